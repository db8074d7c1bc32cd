use serde::{Deserialize, Serialize};

// ============================================================================
// Attribute names
// ============================================================================

pub const AX_ROLE: &str = "AXRole";
pub const AX_ROLE_DESCRIPTION: &str = "AXRoleDescription";
pub const AX_SUBROLE: &str = "AXSubrole";
pub const AX_LABEL: &str = "AXLabel";
pub const AX_TITLE: &str = "AXTitle";
pub const AX_DESCRIPTION: &str = "AXDescription";
pub const AX_HELP: &str = "AXHelp";
pub const AX_VALUE: &str = "AXValue";
pub const AX_SELECTED: &str = "AXSelected";
pub const AX_ENABLED: &str = "AXEnabled";
pub const AX_FOCUSED: &str = "AXFocused";

pub const AX_POSITION: &str = "AXPosition";
pub const AX_SIZE: &str = "AXSize";
pub const AX_HIDDEN: &str = "AXHidden";
pub const AX_VISIBLE: &str = "AXVisible";
pub const AX_MAIN: &str = "AXMain";

pub const AX_SELECTED_TEXT_RANGE: &str = "AXSelectedTextRange";
pub const AX_SELECTED_TEXT_BOUNDS: &str = "AXSelectedTextBounds";
pub const AX_SELECTED_TEXT: &str = "AXSelectedText";
pub const AX_MARKED_TEXT_RANGE: &str = "AXMarkedTextRange";
pub const AX_NUMBER_OF_CHARACTERS: &str = "AXNumberOfCharacters";
pub const AX_PLACEHOLDER_VALUE: &str = "AXPlaceholderValue";

/// Attributes folded into a node's path segment, in this order.
pub const PATH_ATTRIBUTES: [&str; 7] = [
    AX_ROLE,
    AX_ROLE_DESCRIPTION,
    AX_LABEL,
    AX_TITLE,
    AX_DESCRIPTION,
    AX_HELP,
    AX_SUBROLE,
];

/// Attributes projected into a snapshot node's `a` map.
pub const SNAPSHOT_ATTRIBUTES: [&str; 11] = [
    AX_ROLE,
    AX_ROLE_DESCRIPTION,
    AX_VALUE,
    AX_LABEL,
    AX_TITLE,
    AX_DESCRIPTION,
    AX_HELP,
    AX_SELECTED,
    AX_ENABLED,
    AX_FOCUSED,
    AX_SUBROLE,
];

/// Roles that get the extra text-selection attributes.
pub const TEXT_INPUT_ROLES: [&str; 3] = ["AXTextField", "AXTextArea", "AXComboBox"];

/// Joins labels within a segment and segments within a path.
pub const PATH_SEPARATOR: &str = " -> ";

// ============================================================================
// Attribute values
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRange {
    pub location: i64,
    pub length: i64,
}

/// A value read from a live node.
///
/// The accessibility service hands back differently shaped values depending on
/// the attribute and role; this is the closed set the rest of the crate sees.
/// Variant order matters for the untagged representation: rectangles must be
/// tried before points and sizes, which would otherwise swallow them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Flag(bool),
    Number(f64),
    Text(String),
    Rect(Rect),
    Point(Point),
    Size(Size),
    Range(TextRange),
    Opaque { debug: String },
}

impl AttrValue {
    /// Stringify for paths and the snapshot attribute map.
    ///
    /// Path identity depends on this being stable: changing any arm changes
    /// every id derived from a node carrying that kind of value.
    pub fn render(&self) -> String {
        match self {
            AttrValue::Flag(b) => b.to_string(),
            AttrValue::Number(n) => n.to_string(),
            AttrValue::Text(s) => s.replace('\n', "\\n"),
            AttrValue::Point(p) => format!("({}, {})", p.x, p.y),
            AttrValue::Size(s) => format!("({}, {})", s.width, s.height),
            AttrValue::Rect(r) => format!("({}, {}, {}, {})", r.x, r.y, r.width, r.height),
            AttrValue::Range(r) => format!("loc={} len={}", r.location, r.length),
            AttrValue::Opaque { debug } => debug.clone(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Flag(b) => Some(*b),
            AttrValue::Number(n) => Some(*n != 0.0),
            _ => None,
        }
    }

    pub fn as_point(&self) -> Option<Point> {
        match self {
            AttrValue::Point(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_size(&self) -> Option<Size> {
        match self {
            AttrValue::Size(s) => Some(*s),
            _ => None,
        }
    }

    pub fn as_range(&self) -> Option<TextRange> {
        match self {
            AttrValue::Range(r) => Some(*r),
            _ => None,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Text(s)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Flag(b)
    }
}

impl From<f64> for AttrValue {
    fn from(n: f64) -> Self {
        AttrValue::Number(n)
    }
}

impl From<Point> for AttrValue {
    fn from(p: Point) -> Self {
        AttrValue::Point(p)
    }
}

impl From<Size> for AttrValue {
    fn from(s: Size) -> Self {
        AttrValue::Size(s)
    }
}

impl From<TextRange> for AttrValue {
    fn from(r: TextRange) -> Self {
        AttrValue::Range(r)
    }
}
