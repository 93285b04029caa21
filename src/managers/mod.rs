// State managers
// Managers own stateful operations; the tab manager coordinates tabs and their page views.

pub mod tab_manager;
