use crate::element::attrs::{
    ATTR_BASE_COLOR, ATTR_HEIGHT, ATTR_PIXEL_SIZE, ATTR_PIXELS, ATTR_WIDTH, ScanAttributes,
    is_observed,
};
use crate::render::cpu::CpuSurface;
use crate::render::grid::render_grid;
use crate::render::surface::Surface;

/// Element-style facade over the grid renderer.
///
/// Owns the raw attributes and the drawing surface. Rendering happens on demand: when the
/// element is connected and whenever an observed attribute is set or removed.
#[derive(Debug, Default)]
pub struct ScanCanvas<S = CpuSurface> {
    attrs: ScanAttributes,
    surface: S,
}

impl<S: Surface> ScanCanvas<S> {
    pub fn new(surface: S) -> Self {
        Self {
            attrs: ScanAttributes::new(),
            surface,
        }
    }

    /// Build with an initial attribute set. Nothing is drawn until [`Self::connect`].
    pub fn with_attributes(surface: S, attrs: ScanAttributes) -> Self {
        Self { attrs, surface }
    }

    /// Initial render after the element becomes live.
    pub fn connect(&mut self) {
        self.render();
    }

    pub fn attributes(&self) -> &ScanAttributes {
        &self.attrs
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attrs.get(name)
    }

    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        self.attrs.set(name, value);
        self.attribute_changed(name);
    }

    pub fn remove_attribute(&mut self, name: &str) {
        if self.attrs.remove(name).is_some() {
            self.attribute_changed(name);
        }
    }

    fn attribute_changed(&mut self, name: &str) {
        if is_observed(name) {
            tracing::trace!(attribute = name, "observed attribute changed");
            self.render();
        }
    }

    pub fn width_px(&self) -> f64 {
        self.attrs.width_px()
    }

    pub fn set_width_px(&mut self, v: f64) {
        self.set_attribute(ATTR_WIDTH, v.to_string());
    }

    pub fn height_px(&self) -> f64 {
        self.attrs.height_px()
    }

    pub fn set_height_px(&mut self, v: f64) {
        self.set_attribute(ATTR_HEIGHT, v.to_string());
    }

    pub fn pixel_size(&self) -> f64 {
        self.attrs.pixel_size()
    }

    pub fn set_pixel_size(&mut self, v: f64) {
        self.set_attribute(ATTR_PIXEL_SIZE, v.to_string());
    }

    pub fn base_color(&self) -> &str {
        self.attrs.base_color()
    }

    pub fn set_base_color(&mut self, color: &str) {
        self.set_attribute(ATTR_BASE_COLOR, color);
    }

    pub fn pixels(&self) -> Vec<f64> {
        self.attrs.pixels()
    }

    /// Store `values` as a JSON array. Non-finite values serialize as `null`.
    pub fn set_pixels(&mut self, values: &[f64]) {
        let json = serde_json::Value::from(values.to_vec()).to_string();
        self.set_attribute(ATTR_PIXELS, json);
    }

    /// Normalize the attributes and redraw the surface from scratch.
    pub fn render(&mut self) {
        let input = self.attrs.to_grid_input();
        render_grid(&mut self.surface, &input.as_params());
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}

#[cfg(test)]
#[path = "../../tests/unit/element/canvas.rs"]
mod tests;
