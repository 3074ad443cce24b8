mod config_tests;
mod scroll_tests;
