mod controller;
mod settings;

pub use controller::{CameraController, Motion, Window, WrapPolicy};
pub use settings::{SettingChange, SettingId, Settings, Tunable};
