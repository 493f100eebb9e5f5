pub mod archive;
pub mod batch;
pub mod cli;
pub mod constants;
pub mod data_url;
pub mod error;
pub mod formats;
pub mod input;
pub mod logger;
pub mod processing;
pub mod store;
pub mod utils;
pub mod validation;

pub use archive::{build_archive, save_record, write_archive};
pub use batch::{BatchController, BatchObserver, BatchSummary, BatchTicket, SilentObserver};
pub use data_url::DataUrl;
pub use error::{CompressionError, Result};
pub use formats::ImageKind;
pub use input::{collect_input_files, InputFile};
pub use processing::{decode, encode, measure, recompress, CompressionOptions};
pub use store::{ResultRecord, ResultStore};
pub use utils::format_file_size;
