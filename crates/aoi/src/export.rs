//! Text exports of an AOI.

/// Command line for running the downloader offline against the same AOI.
///
/// Pure templating: the WKT is embedded verbatim inside double quotes.
pub fn cli_command(username: &str, start: &str, end: &str, wkt: &str) -> String {
    format!(
        r#"python .\main.py --username "{}" --start {} --end {} --aoi "{}""#,
        username, start, end, wkt
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_command() {
        let cmd = cli_command(
            "YOUR_EMAIL",
            "2021-12-01",
            "2022-01-15",
            "POLYGON((2 1,4 3,6 5,2 1))",
        );
        assert_eq!(
            cmd,
            r#"python .\main.py --username "YOUR_EMAIL" --start 2021-12-01 --end 2022-01-15 --aoi "POLYGON((2 1,4 3,6 5,2 1))""#
        );
    }
}
