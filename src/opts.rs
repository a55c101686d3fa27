//! Parsing for the thread and chunk-size specifications shared by the
//! binaries: a comma-separated list whose items are positive integers or
//! inclusive `start:end[:step]` ranges. The result is sorted and
//! deduplicated, so `8,1:4` comes out as `[1, 2, 3, 4, 8]`.

use crate::error::{Error, Result};

pub fn parse_positive(text: &str, what: &str) -> Result<usize> {
    match text.trim().parse::<usize>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(Error::BadArgument(format!("invalid {what}: {text:?}"))),
    }
}

pub fn parse_range_list(spec: &str, what: &str) -> Result<Vec<usize>> {
    if spec.trim().is_empty() {
        return Err(Error::BadArgument(format!("{what} specification is empty")));
    }

    let mut values = Vec::new();
    for item in spec.split(',') {
        if !item.contains(':') {
            values.push(parse_positive(item, what)?);
            continue;
        }

        let parts: Vec<&str> = item.split(':').collect();
        let (start, end, step) = match parts[..] {
            [start, end] => (
                parse_positive(start, what)?,
                parse_positive(end, what)?,
                1,
            ),
            [start, end, step] => (
                parse_positive(start, what)?,
                parse_positive(end, what)?,
                parse_positive(step, what)?,
            ),
            _ => {
                return Err(Error::BadArgument(format!(
                    "invalid {what} range: {item:?}"
                )))
            }
        };
        if end < start {
            return Err(Error::BadArgument(format!(
                "invalid {what} range: {item:?} (end below start)"
            )));
        }

        values.extend((start..=end).step_by(step));
    }

    values.sort_unstable();
    values.dedup();
    Ok(values)
}
