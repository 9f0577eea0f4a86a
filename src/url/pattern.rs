//! Next-page prediction for numbered pagination
//!
//! When a page cannot be fetched its next link is unknown. Catalogs that
//! number their pages (`page-2.html`, `?page=2`) still let the walker guess
//! it: the step between the previous URL and the failed URL is repeated once
//! more.

use url::Url;

/// One run of a URL string: either all ASCII digits or none
#[derive(Debug, PartialEq, Eq)]
enum Run<'a> {
    Digits(&'a str),
    Text(&'a str),
}

fn runs(s: &str) -> Vec<Run<'_>> {
    let mut runs = Vec::new();
    let mut start = 0;
    let bytes = s.as_bytes();

    for i in 1..=bytes.len() {
        let boundary = i == bytes.len() || bytes[i].is_ascii_digit() != bytes[i - 1].is_ascii_digit();
        if boundary {
            let run = &s[start..i];
            if bytes[start].is_ascii_digit() {
                runs.push(Run::Digits(run));
            } else {
                runs.push(Run::Text(run));
            }
            start = i;
        }
    }

    runs
}

/// Predicts the page after `failed` from the step between `previous` and `failed`
///
/// Both URLs must be identical except for exactly one decimal number, and that
/// number must increase from `previous` to `failed`. The prediction applies the
/// same increase to `failed`, keeping zero padding.
///
/// # Examples
///
/// ```
/// use catalog_walker::url::predict_next_page;
/// use url::Url;
///
/// let previous = Url::parse("http://books.toscrape.com/catalogue/page-2.html").unwrap();
/// let failed = Url::parse("http://books.toscrape.com/catalogue/page-3.html").unwrap();
/// let next = predict_next_page(&previous, &failed).unwrap();
/// assert_eq!(next.as_str(), "http://books.toscrape.com/catalogue/page-4.html");
/// ```
pub fn predict_next_page(previous: &Url, failed: &Url) -> Option<Url> {
    let previous_runs = runs(previous.as_str());
    let failed_runs = runs(failed.as_str());

    if previous_runs.len() != failed_runs.len() {
        return None;
    }

    let mut changed = None;
    for (index, (before, after)) in previous_runs.iter().zip(&failed_runs).enumerate() {
        match (before, after) {
            (Run::Text(a), Run::Text(b)) if a == b => {}
            (Run::Digits(a), Run::Digits(b)) if a == b => {}
            (Run::Digits(a), Run::Digits(b)) => {
                if changed.is_some() {
                    return None;
                }
                changed = Some((index, *a, *b));
            }
            _ => return None,
        }
    }

    let (index, before, after) = changed?;
    let before: u64 = before.parse().ok()?;
    let after_value: u64 = after.parse().ok()?;
    let step = after_value.checked_sub(before).filter(|step| *step > 0)?;
    let next = after_value.checked_add(step)?;

    let next_run = if after.len() > 1 && after.starts_with('0') {
        format!("{:0width$}", next, width = after.len())
    } else {
        next.to_string()
    };

    let predicted: String = failed_runs
        .iter()
        .enumerate()
        .map(|(i, run)| match run {
            _ if i == index => next_run.as_str(),
            Run::Digits(s) | Run::Text(s) => *s,
        })
        .collect();

    Url::parse(&predicted).ok()
}
