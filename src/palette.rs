use std::fmt;

pub struct Palette;

impl Palette {
    pub const RESET: &'static str = "\x1b[0m";
    pub const DIM: &'static str = "\x1b[2m";

    pub const ACCENT: &'static str = "\x1b[34m";
    pub const INFO: &'static str = "\x1b[36m";
    pub const SUCCESS: &'static str = "\x1b[32m";
    pub const WARNING: &'static str = "\x1b[33m";
    pub const DANGER: &'static str = "\x1b[31m";

    pub fn paint(color: &'static str, value: impl fmt::Display) -> String {
        format!("{}{}{}", color, value, Self::RESET)
    }

    pub fn dim(value: impl fmt::Display) -> String {
        format!("{}{}{}", Self::DIM, value, Self::RESET)
    }
}
