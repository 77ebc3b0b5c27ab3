//! Descriptors for every resource kind served by the backend.
//! Column names and wire names are mapped here and nowhere else.

use crate::config::types::{
    DependentRef, FieldDefault as D, FieldSpec as F, FieldType as T, IdStrategy, ListFilter, Presentation,
    ResourceKind, SortOrder, SyntheticRow,
};

/// Key of the pseudo-category listed ahead of the stored FAQ categories.
pub const ALL_CATEGORIES_KEY: &str = "all";
pub const ALL_CATEGORIES_LABEL: &str = "جميع الأسئلة";

pub static PROJECT_REQUESTS: ResourceKind = ResourceKind {
    name: "Request",
    path_segment: "project-requests",
    table: "project_requests",
    id_column: "id",
    id_wire: "id",
    id_strategy: IdStrategy::AutoIncrement,
    fields: &[
        F::new("name", T::Text, D::EmptyString),
        F::new("company_name", T::Text, D::EmptyString),
        F::new("requested_services", T::TextOrJsonArray, D::EmptyArray),
        F::new("phone", T::Text, D::EmptyString),
        F::new("email", T::Text, D::EmptyString),
    ],
    order: SortOrder::NewestFirst,
    filters: &[],
    dependents: &[],
    presentation: Presentation { mirrors: &[], constants: &[] },
    synthetic_head: None,
};

const PACKAGE_FIELDS: &[F] = &[
    F::new("title", T::Text, D::EmptyString),
    F::new("description", T::Text, D::EmptyString),
    F::new("price", T::Real, D::Null),
    F::new("delivery_time", T::Text, D::Null),
    F::new("features", T::JsonArray, D::EmptyArray),
    F::new("category", T::Text, D::Null),
    F::new("is_active", T::Bool, D::False).aliases(&["isActive"]),
    F::new("display_order", T::Integer, D::Null).aliases(&["order"]),
];

pub static PACKAGES: ResourceKind = ResourceKind {
    name: "Package",
    path_segment: "packages",
    table: "packages",
    id_column: "id",
    id_wire: "id",
    id_strategy: IdStrategy::IntegerOrAuto,
    fields: PACKAGE_FIELDS,
    order: SortOrder::Display { column: "display_order" },
    filters: &[],
    dependents: &[],
    presentation: Presentation { mirrors: &[], constants: &[] },
    synthetic_head: None,
};

pub static PACKAGES_SERVER: ResourceKind = ResourceKind {
    name: "PackageServer",
    path_segment: "packages-server",
    table: "packages_server",
    id_column: "id",
    id_wire: "id",
    id_strategy: IdStrategy::IntegerOrAuto,
    fields: &[
        F::new("title", T::Text, D::EmptyString),
        F::new("description", T::Text, D::EmptyString),
        F::new("price", T::Real, D::Null),
        F::new("delivery_time", T::Text, D::Null),
        F::new("features", T::JsonArray, D::EmptyArray),
        F::new("category", T::Text, D::Null),
        F::new("is_active", T::Bool, D::False).aliases(&["isActive"]),
        F::new("display_order", T::Integer, D::Null).aliases(&["order"]),
        F::new("icon_html", T::Text, D::Null),
    ],
    order: SortOrder::Display { column: "display_order" },
    filters: &[],
    dependents: &[],
    presentation: Presentation { mirrors: &[], constants: &[] },
    synthetic_head: None,
};

pub static PROJECTS: ResourceKind = ResourceKind {
    name: "Project",
    path_segment: "projects",
    table: "projects",
    id_column: "id",
    id_wire: "id",
    id_strategy: IdStrategy::CallerOrTimeDerived,
    fields: &[
        F::new("title", T::Text, D::EmptyString).required(),
        F::new("description", T::Text, D::Null),
        F::new("category", T::Text, D::Null),
        F::new("status", T::Text, D::Null),
        F::new("completion", T::Integer, D::Null),
        F::new("value", T::Text, D::Null),
        F::new("duration", T::Text, D::Null),
        F::new("location", T::Text, D::Null),
        F::new("client", T::Text, D::Null),
        F::new("image", T::Text, D::Null),
        F::new("startDate", T::Text, D::Null),
        F::new("endDate", T::Text, D::Null),
    ],
    order: SortOrder::Insertion,
    filters: &[],
    dependents: &[],
    presentation: Presentation { mirrors: &[], constants: &[] },
    synthetic_head: None,
};

pub static SERVICES: ResourceKind = ResourceKind {
    name: "Service",
    path_segment: "services",
    table: "services",
    id_column: "id",
    id_wire: "id",
    id_strategy: IdStrategy::AutoIncrement,
    fields: &[
        F::new("title", T::Text, D::Null),
        F::new("description", T::Text, D::Null),
        F::new("short_description", T::Text, D::Null).aliases(&["shortDescription"]),
        F::new("icon", T::Text, D::Null),
        F::new("image", T::Text, D::Null),
        F::new("features", T::JsonArray, D::EmptyArray),
        F::new("benefits", T::JsonArray, D::EmptyArray),
        F::new("category", T::Text, D::Null),
        F::new("is_active", T::Bool, D::False).aliases(&["isActive"]),
        F::new("display_order", T::Integer, D::Null).aliases(&["order"]),
    ],
    order: SortOrder::Insertion,
    filters: &[],
    dependents: &[],
    presentation: Presentation { mirrors: &[], constants: &[] },
    synthetic_head: None,
};

pub static REVIEWS: ResourceKind = ResourceKind {
    name: "Review",
    path_segment: "reviews",
    table: "reviews",
    id_column: "id",
    id_wire: "id",
    id_strategy: IdStrategy::TimeDerived,
    fields: &[
        F::new("name", T::Text, D::Null).wire("clientName"),
        F::new("position", T::Text, D::Null).wire("clientPosition"),
        F::new("department", T::Text, D::Null).wire("company"),
        F::new("bio", T::Text, D::Null).wire("testimonialText"),
        F::new("email", T::Text, D::Null),
        F::new("phone", T::Text, D::Null),
        F::new("linkedin", T::Text, D::Null),
        F::new("image", T::Text, D::Null).wire("clientImage"),
        F::new("experience", T::Text, D::Null).wire("projectValue"),
        F::new("specialty", T::Text, D::Null).wire("projectName"),
        F::new("achievements", T::Text, D::Null),
        F::new("skills", T::Text, D::Null),
        F::new("isActive", T::Bool, D::False),
        F::new("ordering", T::Integer, D::Null).wire("order"),
        F::new("joinDate", T::Text, D::Null).wire("date"),
    ],
    order: SortOrder::Display { column: "ordering" },
    filters: &[],
    dependents: &[],
    presentation: Presentation {
        mirrors: &[("projectDuration", "projectValue"), ("projectImage", "clientImage")],
        constants: &[("rating", 5)],
    },
    synthetic_head: None,
};

pub static FAQ_CATEGORIES: ResourceKind = ResourceKind {
    name: "Category",
    path_segment: "faq-categories",
    table: "faq_categories",
    id_column: "key",
    id_wire: "key",
    id_strategy: IdStrategy::NaturalKey,
    fields: &[F::new("label", T::Text, D::Null)],
    order: SortOrder::IdAscending,
    filters: &[],
    dependents: &[DependentRef { table: "faqs", column: "category" }],
    presentation: Presentation { mirrors: &[], constants: &[] },
    synthetic_head: Some(SyntheticRow {
        fields: &[("key", ALL_CATEGORIES_KEY), ("label", ALL_CATEGORIES_LABEL)],
    }),
};

pub static FAQS: ResourceKind = ResourceKind {
    name: "FAQ",
    path_segment: "faqs",
    table: "faqs",
    id_column: "id",
    id_wire: "id",
    id_strategy: IdStrategy::AutoIncrement,
    fields: &[
        F::new("category", T::Text, D::Null),
        F::new("question", T::Text, D::Null),
        F::new("answer", T::Text, D::Null),
    ],
    order: SortOrder::IdAscending,
    filters: &[ListFilter::Equals {
        param: "category",
        column: "category",
        wildcard: ALL_CATEGORIES_KEY,
    }],
    dependents: &[],
    presentation: Presentation { mirrors: &[], constants: &[] },
    synthetic_head: None,
};

pub static TEAM_MEMBERS: ResourceKind = ResourceKind {
    name: "Team member",
    path_segment: "team-members",
    table: "team_members",
    id_column: "id",
    id_wire: "id",
    id_strategy: IdStrategy::TimeDerived,
    fields: &[
        F::new("name", T::Text, D::EmptyString).required(),
        F::new("position", T::Text, D::Null),
        F::new("department", T::Text, D::Null),
        F::new("bio", T::Text, D::Null),
        F::new("email", T::Text, D::Null),
        F::new("phone", T::Text, D::Null),
        F::new("linkedin", T::Text, D::Null),
        F::new("image", T::Text, D::Null),
        F::new("experience", T::Text, D::Null),
        F::new("specialty", T::Text, D::Null),
        F::new("achievements", T::JsonArray, D::EmptyArray),
        F::new("skills", T::JsonArray, D::EmptyArray),
        F::new("isActive", T::Bool, D::False),
        F::new("order", T::Integer, D::Null),
        F::new("joinDate", T::Text, D::Null),
    ],
    order: SortOrder::Display { column: "order" },
    filters: &[ListFilter::ActiveOnly {
        param: "active",
        column: "isActive",
    }],
    dependents: &[],
    presentation: Presentation { mirrors: &[], constants: &[] },
    synthetic_head: None,
};

pub static CONTACT_REQUESTS: ResourceKind = ResourceKind {
    name: "Contact request",
    path_segment: "contact-requests",
    table: "contact_requests",
    id_column: "id",
    id_wire: "id",
    id_strategy: IdStrategy::AutoIncrement,
    fields: &[
        F::new("name", T::Text, D::EmptyString).required(),
        F::new("reason", T::Text, D::EmptyString).required(),
        F::new("other_reason", T::Text, D::Null),
        F::new("message", T::Text, D::Null),
        F::new("phone", T::Text, D::Null),
        F::new("email", T::Text, D::Null),
    ],
    order: SortOrder::NewestFirst,
    filters: &[],
    dependents: &[],
    presentation: Presentation { mirrors: &[], constants: &[] },
    synthetic_head: None,
};

/// Every kind, in the order tables are created.
pub static ALL_KINDS: &[&ResourceKind] = &[
    &PROJECT_REQUESTS,
    &PACKAGES,
    &PACKAGES_SERVER,
    &PROJECTS,
    &SERVICES,
    &REVIEWS,
    &FAQ_CATEGORIES,
    &FAQS,
    &TEAM_MEMBERS,
    &CONTACT_REQUESTS,
];
