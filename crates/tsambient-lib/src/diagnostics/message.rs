use std::fmt;
use std::ops::Range;

/// Diagnostic kinds, grouped by what the renderers do about them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Constructs the renderers cannot express - fatal
    UnsupportedConstruct,
    SyntaxError,

    // Deliberately unsupported - skipped, translation continues
    NestedDeclaration,
    EmptyMember,
    InitializerBlock,
    UnsupportedTopLevel,
    StaticImport,
    WildcardImport,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::UnsupportedConstruct | Self::SyntaxError => Severity::Error,
            _ => Severity::Warning,
        }
    }

    /// Base message for this kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnsupportedConstruct => "unsupported construct",
            Self::SyntaxError => "syntax error",
            Self::NestedDeclaration => "nested declaration skipped",
            Self::EmptyMember => "empty member skipped",
            Self::InitializerBlock => "initializer block skipped",
            Self::UnsupportedTopLevel => "declaration kind has no ambient form, skipped",
            Self::StaticImport => "static import skipped",
            Self::WildcardImport => "wildcard import skipped",
        }
    }

    /// Message with optional detail appended.
    pub fn message(&self, detail: Option<&str>) -> String {
        match detail {
            Some(detail) => format!("{}: {}", self.fallback_message(), detail),
            None => self.fallback_message().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// One diagnostic: kind, severity, message and the byte range it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
    pub range: Range<usize>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, range: Range<usize>, detail: Option<&str>) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            message: kind.message(detail),
            range,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} at {}..{}",
            self.severity, self.message, self.range.start, self.range.end
        )
    }
}
