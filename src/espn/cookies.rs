use crate::league::Credentials;

/// Pulls the ESPN_S2 and SWID values out of a raw browser cookie string
/// (`name=value; name=value`). Cookie names match case-insensitively.
pub fn extract_cookies(cookie_string: &str) -> (Option<String>, Option<String>) {
    let mut espn_s2 = None;
    let mut swid = None;

    for cookie in cookie_string.split(';') {
        let Some((name, value)) = cookie.trim().split_once('=') else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match name.trim().to_ascii_uppercase().as_str() {
            "ESPN_S2" => espn_s2 = Some(value.to_string()),
            "SWID" => swid = Some(value.to_string()),
            _ => {}
        }
    }

    (espn_s2, swid)
}

/// Browser-copied cookies are usually URL-encoded; undecodable input is kept as is
pub fn decode_cookie(value: &str) -> String {
    urlencoding::decode(value.trim())
        .map(|v| v.into_owned())
        .unwrap_or_else(|_| value.trim().to_string())
}

pub fn decode_credentials(credentials: &Credentials) -> Credentials {
    Credentials {
        espn_s2: decode_cookie(&credentials.espn_s2),
        swid: decode_cookie(&credentials.swid),
    }
}

/// Value for the Cookie request header
pub fn cookie_header(credentials: &Credentials) -> String {
    format!("espn_s2={}; SWID={}", credentials.espn_s2, credentials.swid)
}
