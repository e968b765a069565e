//! Route template resolution.
//!
//! Templates name their placeholders with a leading colon, e.g.
//! `/d2l/api/lp/:version/users/:userId`. Mappings are applied in order, so the first mapping
//! that names a placeholder wins; placeholders no mapping names are left verbatim.

/// Substitutes `:key` placeholders in `template` with values from `mappings`, in order.
pub fn resolve<M, K, V>(template: &str, mappings: M) -> String
where
	M: IntoIterator<Item = (K, V)>,
	K: AsRef<str>,
	V: ToString,
{
	let mut path = template.to_owned();

	for (key, value) in mappings {
		path = substitute(&path, key.as_ref(), &value.to_string());
	}

	path
}

/// Replaces every `:key` occurrence whose key is not followed by another identifier character.
pub fn substitute(template: &str, key: &str, value: &str) -> String {
	if key.is_empty() {
		return template.to_owned();
	}

	let needle = format!(":{key}");
	let mut out = String::with_capacity(template.len());
	let mut rest = template;

	while let Some(idx) = rest.find(&needle) {
		let end = idx + needle.len();
		let bounded = rest[end..].chars().next().is_none_or(|c| !is_key_char(c));

		out.push_str(&rest[..idx]);

		if bounded {
			out.push_str(value);
		} else {
			out.push_str(&needle);
		}

		rest = &rest[end..];
	}

	out.push_str(rest);

	out
}

/// Lists the placeholder names still present in `path`.
pub fn placeholders(path: &str) -> Vec<&str> {
	let mut names = Vec::new();
	let mut rest = path;

	while let Some(idx) = rest.find(':') {
		let tail = &rest[idx + 1..];
		let len = tail.find(|c: char| !is_key_char(c)).unwrap_or(tail.len());

		if len > 0 {
			names.push(&tail[..len]);
		}

		rest = &tail[len..];
	}

	names
}

fn is_key_char(c: char) -> bool {
	c.is_ascii_alphanumeric() || c == '_'
}
