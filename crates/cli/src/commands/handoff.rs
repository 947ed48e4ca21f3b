//! Build a WhatsApp handoff link for a message.
//!
//! # Usage
//!
//! ```bash
//! maas-cli handoff "Hello, is the mango pickle back in stock?"
//! maas-cli handoff --to "+91 90000 00000" --mobile "Hi"
//! ```

use maas_pickles_core::{ClientPlatform, build_handoff_url};
use maas_pickles_storefront::config::DEFAULT_HANDOFF_DESTINATION;

/// Print the handoff URL for `message`.
pub fn print_link(destination: Option<&str>, message: &str, mobile: bool) {
    let destination = destination.unwrap_or(DEFAULT_HANDOFF_DESTINATION);
    let platform = if mobile {
        ClientPlatform::Mobile
    } else {
        ClientPlatform::Desktop
    };

    #[allow(clippy::print_stdout)]
    {
        println!("{}", build_handoff_url(destination, message, platform));
    }
}
