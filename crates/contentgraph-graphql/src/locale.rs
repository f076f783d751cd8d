//! Locale argument resolution.
//!
//! Fields that accept `locale`/`allowFallback` arguments turn them into
//! [`LoaderOptions`] here. A malformed locale is reported to the caller,
//! never replaced with the default.

use async_graphql::dynamic::ResolverContext;
use contentgraph_core::Locale;
use contentgraph_storage::LoaderOptions;
use tracing::trace;

use crate::error::ContentGraphError;

/// Argument carrying the requested locale.
pub const LOCALE_ARG: &str = "locale";

/// Argument controlling locale fallback.
pub const ALLOW_FALLBACK_ARG: &str = "allowFallback";

/// Resolves raw argument values into loader options.
///
/// An absent locale yields `default`; an absent `allowFallback` yields
/// `default_fallback`.
///
/// # Errors
///
/// Returns [`ContentGraphError::UnrecognizedLocale`] if `locale` is present
/// but not a well-formed locale tag.
pub fn resolve_locale(
    locale: Option<&str>,
    allow_fallback: Option<bool>,
    default: &Locale,
    default_fallback: bool,
) -> Result<LoaderOptions, ContentGraphError> {
    let locale = match locale {
        Some(tag) => Locale::parse(tag)?,
        None => default.clone(),
    };
    let allow_fallback = allow_fallback.unwrap_or(default_fallback);

    trace!(locale = %locale, allow_fallback, "Resolved locale arguments");
    Ok(LoaderOptions::new(locale).with_fallback(allow_fallback))
}

/// Reads the `locale` and `allowFallback` arguments of the current field.
///
/// Explicit `null` arguments are treated as absent.
pub(crate) fn options_from_args(
    ctx: &ResolverContext<'_>,
    default: &LoaderOptions,
) -> Result<LoaderOptions, ContentGraphError> {
    let locale = match ctx.args.get(LOCALE_ARG) {
        Some(value) if !value.is_null() => Some(
            value
                .string()
                .map_err(|e| ContentGraphError::InvalidArgument(e.message))?,
        ),
        _ => None,
    };

    let allow_fallback = match ctx.args.get(ALLOW_FALLBACK_ARG) {
        Some(value) if !value.is_null() => Some(
            value
                .boolean()
                .map_err(|e| ContentGraphError::InvalidArgument(e.message))?,
        ),
        _ => None,
    };

    resolve_locale(locale, allow_fallback, &default.locale, default.allow_fallback)
}
