use ron::{Options, extensions::Extensions, ser::PrettyConfig};

pub const RON_EXTENSIONS: Extensions = Extensions::UNWRAP_NEWTYPES
    .union(Extensions::IMPLICIT_SOME)
    .union(Extensions::UNWRAP_VARIANT_NEWTYPES);

/// The options every grid document is read and written with.
pub fn ron_options() -> Options {
    Options::default().with_default_extension(RON_EXTENSIONS)
}

pub fn pretty_config() -> PrettyConfig {
    PrettyConfig::default().struct_names(false).depth_limit(4)
}
