//! Decoding of textual search filters.
//!
//! A recursive-descent parser for the RFC 4515 string representation.
//! The parser works on raw bytes with explicit `[start, end)` bounds
//! so sub-filters decode in place without copying, and every reported
//! position refers to the original filter string.
//!
//! Two deliberate deviations from the strict grammar:
//!
//! - a filter enclosed in apostrophes is rejected outright, to
//!   diagnose a common quoting mistake;
//! - attribute descriptions additionally accept the underscore, and
//!   the semicolon and equal sign used by attribute options.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::error::{FilterError, FilterResult};
use crate::escape;
use crate::filter::{Filter, FilterKind};

/// Decodes the string representation of a search filter.
///
/// # Errors
///
/// Returns a [`FilterError`] mapping onto the protocolError result
/// code when the string is not a valid filter.
pub fn decode(filter: &str) -> FilterResult<Filter> {
    decode_bytes(filter.as_bytes())
}

/// Decodes a search filter from raw bytes.
///
/// The printer emits assertion-value octets verbatim, so a printed
/// filter is not always valid UTF-8; this entry point accepts such
/// output. [`decode`] delegates here.
///
/// # Errors
///
/// Returns a [`FilterError`] when the bytes are not a valid filter.
/// An unexpected fault inside the parser is caught, logged, and
/// reported as [`FilterError::UncaughtException`].
pub fn decode_bytes(filter: &[u8]) -> FilterResult<Filter> {
    match panic::catch_unwind(AssertUnwindSafe(|| decode_range(filter, 0, filter.len()))) {
        Ok(Ok(parsed)) => Ok(parsed),
        Ok(Err(err)) => {
            tracing::debug!("failed to decode search filter: {}", err);
            Err(err)
        }
        Err(payload) => {
            let filter = lossy(filter);
            let cause = panic_cause(payload.as_ref());
            tracing::error!(
                "uncaught exception while decoding search filter {:?}: {}",
                filter,
                cause
            );
            Err(FilterError::UncaughtException { filter, cause })
        }
    }
}

fn panic_cause(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unidentified panic".to_string()
    }
}

/// Decodes the filter occupying `[start, end)` of `filter`.
fn decode_range(filter: &[u8], mut start: usize, mut end: usize) -> FilterResult<Filter> {
    if end <= start {
        return Err(FilterError::EmptyFilter);
    }

    // A filter enclosed in a pair of apostrophes is a common quoting
    // mistake; reject it with a dedicated error.
    if filter.len() > 1 && filter.first() == Some(&b'\'') && filter.last() == Some(&b'\'') {
        return Err(FilterError::EnclosedInApostrophes(lossy(filter)));
    }

    // Strip the surrounding parentheses, if present.
    if filter[start] == b'(' {
        if filter[end - 1] == b')' {
            start += 1;
            end -= 1;
        } else {
            return Err(FilterError::MismatchedParentheses {
                filter: lossy(filter),
                start,
                end,
            });
        }
    }

    match filter[start] {
        b'&' => decode_compound(FilterKind::And, filter, start + 1, end),
        b'|' => decode_compound(FilterKind::Or, filter, start + 1, end),
        b'!' => decode_compound(FilterKind::Not, filter, start + 1, end),
        _ => decode_simple(filter, start, end),
    }
}

/// Decodes a simple filter: attribute description, operator, value.
fn decode_simple(filter: &[u8], start: usize, end: usize) -> FilterResult<Filter> {
    // A simple filter must have an equal sign beyond its first byte.
    let equal_pos = match filter[start..end].iter().position(|&b| b == b'=') {
        Some(offset) if offset > 0 => start + offset,
        _ => {
            return Err(FilterError::NoEqualSign {
                filter: lossy(filter),
                start,
                end,
            })
        }
    };

    // The byte before the equal sign selects the filter kind.
    let (kind, attr_end) = match filter[equal_pos - 1] {
        b'~' => (FilterKind::ApproximateMatch, equal_pos - 1),
        b'>' => (FilterKind::GreaterOrEqual, equal_pos - 1),
        b'<' => (FilterKind::LessOrEqual, equal_pos - 1),
        b':' => return decode_extensible(filter, start, equal_pos, end),
        _ => (FilterKind::Equality, equal_pos),
    };

    let attribute = parse_attribute(&filter[start..attr_end])?;

    let raw_value = &filter[equal_pos + 1..end];
    if raw_value.is_empty() {
        return Ok(simple_filter(kind, attribute, Vec::new()));
    }
    if raw_value == b"*" {
        return Ok(Filter::Present { attribute });
    }
    if raw_value.contains(&b'*') {
        return decode_substring(filter, attribute, equal_pos, end);
    }

    let value = escape::decode_value(raw_value, filter, equal_pos)?.into_owned();
    Ok(simple_filter(kind, attribute, value))
}

fn simple_filter(kind: FilterKind, attribute: String, value: Vec<u8>) -> Filter {
    match kind {
        FilterKind::ApproximateMatch => Filter::ApproximateMatch { attribute, value },
        FilterKind::GreaterOrEqual => Filter::GreaterOrEqual { attribute, value },
        FilterKind::LessOrEqual => Filter::LessOrEqual { attribute, value },
        _ => Filter::Equality { attribute, value },
    }
}

/// Validates the bytes of an attribute description.
///
/// ASCII letters and digits, the dash, and the underscore are
/// accepted, plus the semicolon and the equal sign used by attribute
/// options.
fn parse_attribute(raw: &[u8]) -> FilterResult<String> {
    for (i, &b) in raw.iter().enumerate() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b';' | b'=' => {}
            _ => {
                return Err(FilterError::InvalidCharInAttrType {
                    attribute: lossy(raw),
                    character: char::from(b),
                    position: i,
                })
            }
        }
    }
    Ok(lossy(raw))
}

/// Decodes the content of an AND, OR or NOT filter: a concatenation
/// of parenthesised sub-filters.
fn decode_compound(kind: FilterKind, filter: &[u8], start: usize, end: usize) -> FilterResult<Filter> {
    let mut components = Vec::new();

    // No content at all is the absolute-true AND or absolute-false OR.
    if start == end {
        if kind == FilterKind::Not {
            return Err(not_exactly_one(filter, start, end));
        }
        return Ok(compound_filter(kind, components));
    }

    // Each component must be parenthesised, so the content begins with
    // an open and ends with a close.
    if filter[start] != b'(' || filter[end - 1] != b')' {
        return Err(FilterError::CompoundMissingParentheses {
            filter: lossy(filter),
            start,
            end,
        });
    }

    // Walk the content, matching parentheses by nesting depth. Each
    // time the depth returns to zero a component is complete.
    let mut pending_opens = 0usize;
    let mut open_pos = None;
    for i in start..end {
        match filter[i] {
            b'(' => {
                if open_pos.is_none() {
                    open_pos = Some(i);
                }
                pending_opens += 1;
            }
            b')' => {
                if pending_opens == 0 {
                    return Err(FilterError::NoCorrespondingOpenParenthesis {
                        filter: lossy(filter),
                        position: i,
                    });
                }
                pending_opens -= 1;
                if pending_opens == 0 {
                    if let Some(open) = open_pos.take() {
                        components.push(decode_range(filter, open, i + 1)?);
                    }
                }
            }
            _ => {
                if pending_opens == 0 {
                    return Err(FilterError::CompoundMissingParentheses {
                        filter: lossy(filter),
                        start,
                        end,
                    });
                }
            }
        }
    }

    if pending_opens != 0 {
        return Err(FilterError::NoCorrespondingCloseParenthesis {
            filter: lossy(filter),
            position: open_pos.unwrap_or(start),
        });
    }

    if kind == FilterKind::Not {
        let mut components = components.into_iter();
        return match (components.next(), components.next()) {
            (Some(component), None) => Ok(Filter::not(component)),
            _ => Err(not_exactly_one(filter, start, end)),
        };
    }
    Ok(compound_filter(kind, components))
}

fn compound_filter(kind: FilterKind, components: Vec<Filter>) -> Filter {
    match kind {
        FilterKind::Or => Filter::Or(components),
        _ => Filter::And(components),
    }
}

fn not_exactly_one(filter: &[u8], start: usize, end: usize) -> FilterError {
    FilterError::NotRequiresExactlyOne {
        filter: lossy(filter),
        start,
        end,
    }
}

/// Decodes a substring filter value: fragments separated by asterisks.
fn decode_substring(
    filter: &[u8],
    attribute: String,
    equal_pos: usize,
    end: usize,
) -> FilterResult<Filter> {
    let value = &filter[equal_pos + 1..end];

    let asterisks: Vec<usize> = value
        .iter()
        .enumerate()
        .filter(|&(_, &b)| b == b'*')
        .map(|(i, _)| i)
        .collect();
    let Some((&first, rest)) = asterisks.split_first() else {
        // The caller only dispatches here when an asterisk was seen.
        return Err(FilterError::SubstringNoAsterisks {
            filter: lossy(filter),
            start: equal_pos + 1,
            end,
        });
    };

    let sub_initial = if first == 0 {
        None
    } else {
        Some(escape::decode_value(&value[..first], filter, equal_pos)?.into_owned())
    };

    let mut sub_any = Vec::with_capacity(rest.len());
    let mut previous = first;
    for &pos in rest {
        let fragment = escape::decode_value(&value[previous + 1..pos], filter, equal_pos + previous + 1)?;
        sub_any.push(fragment.into_owned());
        previous = pos;
    }

    let sub_final = if previous == value.len() - 1 {
        None
    } else {
        Some(escape::decode_value(&value[previous + 1..], filter, equal_pos + previous + 1)?.into_owned())
    };

    Ok(Filter::Substring {
        attribute,
        sub_initial,
        sub_any,
        sub_final,
    })
}

/// Decodes an extensible-match filter.
///
/// The prefix before the `:=` names, in order, an optional attribute
/// description, an optional `:dn` flag, and an optional matching rule
/// identifier. `:dn` is recognised case-insensitively; the matching
/// rule identifier keeps its original case. The prefix is not
/// charset-validated; lowering validates the attribute description.
fn decode_extensible(
    filter: &[u8],
    start: usize,
    equal_pos: usize,
    end: usize,
) -> FilterResult<Filter> {
    let mut attribute = None;
    let mut matching_rule_id = None;
    let mut dn_attributes = false;

    let lower = filter[start..equal_pos].to_ascii_lowercase();
    if filter[start] == b':' {
        // No attribute description: ":dn" and/or the matching rule.
        if lower.starts_with(b":dn:") {
            dn_attributes = true;
            if start + 4 < equal_pos - 1 {
                matching_rule_id = Some(lossy(&filter[start + 4..equal_pos - 1]));
            }
        } else {
            matching_rule_id = Some(lossy(&filter[start + 1..equal_pos - 1]));
        }
    } else {
        let colon_pos = match filter[start..equal_pos].iter().position(|&b| b == b':') {
            Some(offset) => start + offset,
            None => {
                return Err(FilterError::ExtensibleMatchNoColon {
                    filter: lossy(filter),
                    position: start,
                })
            }
        };
        attribute = Some(lossy(&filter[start..colon_pos]));

        // Whatever follows the attribute description is ":dn" and/or
        // ":" plus the matching rule identifier.
        if colon_pos < equal_pos - 1 {
            if lower[colon_pos - start..].starts_with(b":dn:") {
                dn_attributes = true;
                if colon_pos + 4 < equal_pos - 1 {
                    matching_rule_id = Some(lossy(&filter[colon_pos + 4..equal_pos - 1]));
                }
            } else {
                matching_rule_id = Some(lossy(&filter[colon_pos + 1..equal_pos - 1]));
            }
        }
    }

    let value = escape::decode_value(&filter[equal_pos + 1..end], filter, equal_pos)?.into_owned();

    if attribute.is_none() && matching_rule_id.is_none() {
        return Err(FilterError::ExtensibleMatchNoAttributeOrRule {
            filter: lossy(filter),
            position: start,
        });
    }

    Ok(Filter::ExtensibleMatch {
        attribute,
        matching_rule_id,
        dn_attributes,
        value,
    })
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
