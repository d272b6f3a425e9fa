//! Registration metadata for host integrations
//!
//!     A host (an editor plugin, a highlighting service) that registers this
//!     tokenizer needs a symbolic name, aliases, filename globs, and MIME
//!     types. The core treats all of this as opaque configuration: nothing in
//!     the scanner or the rule table reads it.

/// Opaque registration metadata describing the Turtle tokenizer to a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct TurtleMetadata {
    /// Symbolic name of the tokenizer.
    pub name: &'static str,
    /// Alias strings a host may register alongside the name.
    pub aliases: &'static [&'static str],
    /// Filename glob patterns this tokenizer applies to.
    pub filenames: &'static [&'static str],
    /// MIME types this tokenizer applies to.
    pub mimetypes: &'static [&'static str],
}

/// The metadata for this tokenizer.
pub const METADATA: TurtleMetadata = TurtleMetadata {
    name: "Turtle",
    aliases: &["turtle", "ttl"],
    filenames: &["*.ttl"],
    mimetypes: &["text/turtle", "application/x-turtle"],
};
