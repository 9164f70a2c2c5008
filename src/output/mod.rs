pub mod formatter;

pub use formatter::{
    format_catalog, format_facilities, format_history_table, format_record_detail, format_score,
    format_score_breakdown, should_use_colors,
};
