pub mod guard;
pub mod metric_card;
pub mod nav;
pub mod pager;
pub mod toast;
