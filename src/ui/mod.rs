pub mod bar_editor;
pub mod dialogs;
pub mod task_board;
pub mod theme;
pub mod timeline_chart;
pub mod toolbar;
