pub mod formatter;

pub use formatter::{
    format_category_table, format_dynamic, format_emerging, format_explanation, format_factor,
    format_industry, format_ratio, format_score, format_static, should_use_colors,
};
