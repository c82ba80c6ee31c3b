//! Slugs: URL-safe renderings of display text.

/// Converts display text into a lowercase, hyphen-separated slug.
///
/// Common accented Latin letters are folded to ASCII, everything that is not
/// `[a-z0-9]` after folding collapses into a single `-`, and hyphens are
/// trimmed from both ends. `None` yields the empty string.
///
/// # Examples
///
/// ```
/// use cgi_core::text_to_slug;
///
/// assert_eq!(text_to_slug(Some("Hello, World!")), "hello-world");
/// assert_eq!(text_to_slug(Some("Crème Brûlée")), "creme-brulee");
/// assert_eq!(text_to_slug(Some("  --  ")), "");
/// assert_eq!(text_to_slug(None), "");
/// ```
pub fn text_to_slug(text: Option<&str>) -> String {
    let Some(text) = text else {
        return String::new();
    };

    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for c in text.chars() {
        let folded = fold(c);
        let mut any = false;
        for f in folded.chars().flat_map(char::to_lowercase) {
            if f.is_ascii_alphanumeric() {
                if pending_separator && !slug.is_empty() {
                    slug.push('-');
                }
                pending_separator = false;
                slug.push(f);
                any = true;
            }
        }
        if !any {
            pending_separator = true;
        }
    }

    slug
}

/// Folds a Latin letter with diacritics to its ASCII base.
fn fold(c: char) -> std::borrow::Cow<'static, str> {
    let s: &'static str = match c {
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' | 'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'Ā' | 'ā' => "a",
        'Æ' | 'æ' => "ae",
        'Ç' | 'ç' | 'Č' | 'č' | 'Ć' | 'ć' => "c",
        'Ð' | 'ð' | 'Ď' | 'ď' | 'Đ' | 'đ' => "d",
        'È' | 'É' | 'Ê' | 'Ë' | 'è' | 'é' | 'ê' | 'ë' | 'Ē' | 'ē' | 'Ě' | 'ě' | 'Ę' | 'ę' => "e",
        'Ì' | 'Í' | 'Î' | 'Ï' | 'ì' | 'í' | 'î' | 'ï' | 'Ī' | 'ī' => "i",
        'Ł' | 'ł' => "l",
        'Ñ' | 'ñ' | 'Ň' | 'ň' | 'Ń' | 'ń' => "n",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' | 'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'Ō' | 'ō' => "o",
        'Œ' | 'œ' => "oe",
        'Ř' | 'ř' => "r",
        'Š' | 'š' | 'Ś' | 'ś' => "s",
        'ß' => "ss",
        'Ť' | 'ť' => "t",
        'Þ' | 'þ' => "th",
        'Ù' | 'Ú' | 'Û' | 'Ü' | 'ù' | 'ú' | 'û' | 'ü' | 'Ū' | 'ū' | 'Ů' | 'ů' => "u",
        'Ý' | 'ý' | 'ÿ' | 'Ÿ' => "y",
        'Ž' | 'ž' | 'Ź' | 'ź' | 'Ż' | 'ż' => "z",
        _ => return std::borrow::Cow::Owned(c.to_string()),
    };

    std::borrow::Cow::Borrowed(s)
}
