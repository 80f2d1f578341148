pub mod click;
pub mod question;
pub mod response;

pub use click::{ClickTrackingRecord, ImageSelection, ParsedClick, SelectionClick, VisualClickPoint};
pub use question::{HitZone, HitZoneRegion, ImageFile, QuestionConfig};
pub use response::{load_records, RawResponseRecord};
