use crate::DeviceRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub devices: usize,
    pub compatible: usize,
    pub incompatible: usize,
    pub unknown: usize,
}

impl ReportSummary {
    pub fn from_records(records: &[DeviceRecord]) -> Self {
        records.iter().fold(Self::default(), |mut summary, record| {
            summary.devices += 1;
            match record.compatible {
                Some(true) => summary.compatible += 1,
                Some(false) => summary.incompatible += 1,
                None => summary.unknown += 1,
            }
            summary
        })
    }
}
