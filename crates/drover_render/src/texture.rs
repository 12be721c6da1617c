/// Handle to a named texture plus the dimensions the content catalog
/// reported for it. The framework never touches pixel data; dimensions exist
/// so sprite-sheet geometry (frame counts, source rectangles) can be derived
/// without a graphics device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    name: String,
    width: u32,
    height: u32,
}

impl Texture {
    pub fn new(name: &str, width: u32, height: u32) -> Self {
        Self {
            name: name.to_string(),
            width,
            height,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}
