pub mod constants;
pub mod url_utils;

pub use constants::*;
pub use url_utils::{
    ProxySettings, detail_output_path, is_valid_url, keyword_filename, pin_url_from_href,
    search_url,
};
