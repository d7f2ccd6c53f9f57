use std::sync::Arc;

use base64::Engine as _;

/// One rendered placard.
///
/// Cards are immutable; regeneration replaces the whole list rather than patching cards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameCard {
    name: String,
    png: Arc<[u8]>,
    width: u32,
    height: u32,
}

impl NameCard {
    /// File extension used for image exports.
    pub const IMAGE_EXT: &'static str = "png";

    /// Wrap an encoded PNG produced for `name`.
    pub fn new(name: impl Into<String>, png: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            png: Arc::from(png),
            width,
            height,
        }
    }

    /// The name drawn on the card.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Encoded PNG bytes.
    pub fn png(&self) -> &[u8] {
        &self.png
    }

    /// Raster width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Raster height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `<name>.png`, the download name for this card.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, Self::IMAGE_EXT)
    }

    /// Embeddable `data:` URL carrying the PNG payload.
    pub fn data_url(&self) -> String {
        format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&self.png)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_uses_the_name_verbatim() {
        let card = NameCard::new("张三", vec![1, 2, 3], 2, 2);
        assert_eq!(card.file_name(), "张三.png");
    }

    #[test]
    fn data_url_is_base64_png() {
        let card = NameCard::new("a", vec![0x89, b'P', b'N', b'G'], 1, 1);
        assert_eq!(card.data_url(), "data:image/png;base64,iVBORw==");
    }
}
