mod category;
mod kind;
mod lang;
mod record;

pub use self::category::CategoryMeta;
pub use self::kind::FileType;
pub use self::lang::{DEFAULT_LANGUAGE, LanguageCode, LanguageDisplay, LanguageTable};
pub use self::record::{FileRecord, RawRecord};
