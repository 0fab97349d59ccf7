use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Linear RGBA color, components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }
}

/// Surface appearance attached to an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: Cow<'static, str>,
    pub color: Color,
    pub specular_factor: f64,
    pub glossiness_factor: f64,
}

impl Material {
    /// Used by every element built without an explicit material.
    pub const DEFAULT: Material = Material {
        name: Cow::Borrowed("default"),
        color: Color::WHITE,
        specular_factor: 0.1,
        glossiness_factor: 0.1,
    };

    pub fn new(name: impl Into<Cow<'static, str>>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
            ..Self::DEFAULT
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::DEFAULT
    }
}
