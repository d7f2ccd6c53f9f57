//! Physical unit conversions shared by the renderer and the DOCX writer.

/// Twentieths of a point per centimeter (1 in = 1440 twips = 2.54 cm).
pub(crate) const TWIPS_PER_CM: f64 = 1440.0 / 2.54;

/// English Metric Units per CSS pixel at 96 DPI.
pub(crate) const EMU_PER_PX: f64 = 9525.0;

pub(crate) fn cm_to_twips(cm: f64) -> u32 {
    (cm * TWIPS_PER_CM).round().max(0.0) as u32
}

pub(crate) fn px_to_emu(px: f64) -> u64 {
    (px * EMU_PER_PX).round().max(0.0) as u64
}

/// Scale a physical length into whole pixels, never returning zero for positive input.
pub(crate) fn cm_to_px(cm: f64, px_per_cm: f64) -> u32 {
    let px = (cm * px_per_cm).round();
    if px.is_finite() && px >= 1.0 {
        px as u32
    } else {
        1
    }
}
