mod formatter;
mod golden;
mod properties;
mod trees;
