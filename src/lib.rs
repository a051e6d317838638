pub mod apps;
pub mod constants;
pub mod dispatch;
pub mod event_loop;
pub mod media;
pub mod runner;
pub mod shell;
pub mod speech;
pub mod state;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod window;
