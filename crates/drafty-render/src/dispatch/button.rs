//! Button action URLs.
//!
//! - `act=url`: the `ref` attribute must be an `http`/`https` URL. When the
//!   button has a `name`, `name=val` is appended to its query.
//! - `act=pub`: an internal `<scheme>://<host>/post` URL whose query carries
//!   the button's face text as `title`, then `name` and `val` when named.
//!
//! `val` defaults to `"1"`. Any other action yields no URL.

use crate::dispatch::SpanContext;
use crate::dispatch::full::is_web_url;
use crate::node::StyledNode;
use crate::plain::to_plain;
use crate::util::append_query;

const DEFAULT_VALUE: &str = "1";

pub(crate) fn action_url(ctx: &SpanContext<'_>, face: &StyledNode) -> Option<String> {
    let attrs = ctx.attributes;
    let name = attrs.str("name");
    let value = attrs.str("val").unwrap_or(DEFAULT_VALUE);

    match attrs.str("act")? {
        "url" => {
            let Some(target) = attrs.str("ref").filter(|r| is_web_url(r)) else {
                tracing::debug!(reference = ?attrs.str("ref"), "Button target rejected");
                return None;
            };
            Some(match name {
                Some(name) => append_query(target, &[(name, value)]),
                None => target.to_owned(),
            })
        }
        "pub" => {
            let title = to_plain(face);
            let base = ctx.options.actions.url("/post");
            let mut params = vec![("title", title.as_str())];
            if let Some(name) = name {
                params.push(("name", name));
                params.push(("val", value));
            }
            Some(append_query(&base, &params))
        }
        other => {
            tracing::debug!(act = other, "Unsupported button action");
            None
        }
    }
}
