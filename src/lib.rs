pub mod actions;
pub mod config;
pub mod constants;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod frame;
pub mod keybindings;
pub mod layout;
pub mod manager;
pub mod runner;
pub mod taskbar;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod window;

pub use config::DeskConfig;
pub use error::{ConfigError, DeskError};
pub use manager::{Dispatch, Manager, Projection};
pub use runner::{ContentRenderer, Desktop, DesktopApp, run_desktop};
pub use window::{
    Geometry, OpenOptions, Point, RegistryEvent, Size, WindowData, WindowMode, WindowRegistry,
    WindowState,
};
