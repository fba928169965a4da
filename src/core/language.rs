//! Source languages recognized by the compile stage.

use crate::util::config::BuildConfig;

/// Runtime library linked whenever a C++ translation unit is part of the build.
pub const CXX_RUNTIME_LIBRARY: &str = "stdc++";

/// Source language of a translation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// C language
    C,
    /// C++ language
    Cxx,
}

impl Language {
    /// Both languages, in dispatch order.
    pub const ALL: [Language; 2] = [Language::C, Language::Cxx];

    /// Get the language name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Cxx => "c++",
        }
    }

    /// The extension key this language is routed from.
    pub fn extension<'a>(&self, config: &'a BuildConfig) -> &'a str {
        match self {
            Language::C => &config.extension.source.c,
            Language::Cxx => &config.extension.source.cpp,
        }
    }

    /// The compiler executable used for this language.
    pub fn compiler<'a>(&self, config: &'a BuildConfig) -> &'a str {
        match self {
            Language::C => &config.compiler.c,
            Language::Cxx => &config.compiler.cpp,
        }
    }

    /// Extra library the linker needs when any unit of this language is built.
    pub fn runtime_library(&self) -> Option<&'static str> {
        match self {
            Language::C => None,
            Language::Cxx => Some(CXX_RUNTIME_LIBRARY),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
