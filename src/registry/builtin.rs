use super::descriptor::{NodeCategory, NodeTypeDescriptor};

/// Defines the built-in node types, their ordered listing and the id lookup.
macro_rules! define_builtin_types {
    ( $( ($id:literal, $name:literal, $category:ident, $description:literal) ),* $(,)? ) => {
        /// Ids of the built-in node types, in picker order.
        pub const BUILTIN_TYPE_IDS: &[&str] = &[ $( $id ),* ];

        /// The built-in node types, in picker order.
        pub fn builtin_types() -> Vec<NodeTypeDescriptor> {
            vec![ $( NodeTypeDescriptor::new($id, $name, $description, NodeCategory::$category) ),* ]
        }

        pub fn is_builtin_type(candidate: &str) -> bool {
            matches!(candidate, $( $id )|*)
        }
    };
}

define_builtin_types! {
    ("trigger", "Trigger", Trigger, "Start a workflow when something happens"),
    ("scraper", "Web Scraper", Action, "Extract data from websites"),
    ("filter", "Filter", Logic, "Filter or transform data"),
    ("sheets", "Google Sheets", Action, "Send data to Google Sheets"),
    ("email", "Email", Action, "Send or process emails"),
    ("ai", "AI Processing", Action, "Process data with AI"),
}
