//! Declaration block extraction.
//!
//! A block is a header line such as `interface GigabitEthernet1` or
//! `router ospf 1` and the body lines that belong to it. Dialects differ in
//! how a body ends, so two scanners are provided.

/// A header argument and its body lines (untrimmed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    /// Header text after the keyword, trimmed.
    pub argument: &'a str,
    pub body: Vec<&'a str>,
}

impl<'a> Block<'a> {
    /// First whitespace-separated token of the header argument.
    pub fn first_token(&self) -> &'a str {
        self.argument.split_whitespace().next().unwrap_or(self.argument)
    }

    /// Trimmed body lines, skipping blanks and `!` comments.
    pub fn lines(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.body
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty() && !line.starts_with('!'))
    }
}

/// Blocks whose body ends at the next line starting with one of `terminators`.
///
/// Terminators are matched against the raw line, so only unindented
/// declarations end a body.
pub fn keyword_delimited<'a>(text: &'a str, keyword: &str, terminators: &[&str]) -> Vec<Block<'a>> {
    let mut blocks = Vec::new();
    let mut lines = text.lines().peekable();

    while let Some(line) = lines.next() {
        let Some(argument) = header_argument(line, keyword) else {
            continue;
        };
        let mut body = Vec::new();
        while let Some(next) = lines.peek() {
            if terminators.iter().any(|t| next.starts_with(t)) {
                break;
            }
            body.push(*next);
            lines.next();
        }
        blocks.push(Block { argument, body });
    }
    blocks
}

/// Blocks whose body continues while lines are indented by `indent`
/// whitespace characters or blank.
pub fn indentation_delimited<'a>(text: &'a str, keyword: &str, indent: usize) -> Vec<Block<'a>> {
    let mut blocks = Vec::new();
    let mut lines = text.lines().peekable();

    while let Some(line) = lines.next() {
        let Some(argument) = header_argument(line, keyword) else {
            continue;
        };
        let mut body = Vec::new();
        while let Some(next) = lines.peek() {
            if !is_indented(next, indent) {
                break;
            }
            body.push(*next);
            lines.next();
        }
        blocks.push(Block { argument, body });
    }
    blocks
}

fn is_indented(line: &str, indent: usize) -> bool {
    line.trim().is_empty()
        || (line.chars().count() >= indent && line.chars().take(indent).all(char::is_whitespace))
}

/// Text after `keyword` when `line` is an unindented `keyword <argument>` header.
fn header_argument<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim();
    (!rest.is_empty()).then_some(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CISCO: &str = "\
interface GigabitEthernet1
 description uplink
 ip address 10.0.0.1 255.255.255.0
!
interface GigabitEthernet2
 no ip address
interface Loopback0
 ip address 1.1.1.1 255.255.255.255
router ospf 1
 network 10.0.0.0 0.0.0.255 area 0
";

    const ARUBA: &str = "\
interface 1/1/1
    no shutdown

    ip address 10.0.0.1/24
vlan 10
interface lag 1
    lacp mode active
";

    #[test]
    fn test_keyword_delimited() {
        let blocks = keyword_delimited(CISCO, "interface", &["interface", "router", "!"]);
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].argument, "GigabitEthernet1");
        assert_eq!(blocks[0].body.len(), 2);
        assert_eq!(blocks[1].first_token(), "GigabitEthernet2");
        assert_eq!(blocks[1].body, vec![" no ip address"]);
        assert_eq!(blocks[2].argument, "Loopback0");
        assert_eq!(blocks[2].body.len(), 1);
    }

    #[test]
    fn test_keyword_delimited_multiword_keyword() {
        let blocks = keyword_delimited(CISCO, "router ospf", &["interface", "router", "!"]);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].argument, "1");
        assert_eq!(
            blocks[0].lines().collect::<Vec<_>>(),
            vec!["network 10.0.0.0 0.0.0.255 area 0"]
        );
    }

    #[test]
    fn test_indentation_delimited() {
        let blocks = indentation_delimited(ARUBA, "interface", 4);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].argument, "1/1/1");
        assert_eq!(
            blocks[0].lines().collect::<Vec<_>>(),
            vec!["no shutdown", "ip address 10.0.0.1/24"]
        );
        assert_eq!(blocks[1].argument, "lag 1");
        assert_eq!(blocks[1].lines().collect::<Vec<_>>(), vec!["lacp mode active"]);
    }

    #[test]
    fn test_header_requires_separator() {
        assert_eq!(header_argument("interfaces x", "interface"), None);
        assert_eq!(header_argument("interface", "interface"), None);
        assert_eq!(header_argument(" interface Gi1", "interface"), None);
        assert_eq!(header_argument("interface Gi1 ", "interface"), Some("Gi1"));
    }
}
