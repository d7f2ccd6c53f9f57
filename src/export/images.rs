use crate::card::NameCard;
use crate::export::ExportReport;
use crate::export::delivery::FileDelivery;
use crate::foundation::error::NameCardResult;

/// Deliver each card as `<name>.png`, in card order.
///
/// No archive is built: N cards produce N deliveries, repeated names included. The report lists
/// the names the delivery stored. The first failing delivery aborts the rest.
pub fn export_images(
    cards: &[&NameCard],
    delivery: &mut dyn FileDelivery,
) -> NameCardResult<ExportReport> {
    let mut report = ExportReport::default();
    for card in cards {
        let stored = delivery.deliver(card.png(), &card.file_name())?;
        report.record(stored, card.png().len());
    }
    tracing::info!(files = report.files.len(), "exported placard images");
    Ok(report)
}
