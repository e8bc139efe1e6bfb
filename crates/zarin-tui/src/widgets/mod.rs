pub mod selection;
pub mod sub_tabs;
