// setenv-rs: Build Environment Script Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Platform-dependent variable names.

/// Library search variable used by the macOS dynamic loader.
pub const DARWIN_LIBRARY_PATH: &str = "DYLD_LIBRARY_PATH";

/// Library search variable used by ELF dynamic loaders (Linux, BSD, Solaris).
pub const ELF_LIBRARY_PATH: &str = "LD_LIBRARY_PATH";

/// Module search path extended for the installed Python bindings.
pub const MODULE_SEARCH_PATH: &str = "PYTHONPATH";

/// Picks the dynamic-library-path variable for an OS-family tag.
///
/// Any tag containing `Darwin` (e.g. `Darwin_macosx14.2-arm64-clang15`) gets
/// `DYLD_LIBRARY_PATH`; everything else gets `LD_LIBRARY_PATH`.
#[must_use]
pub fn library_path_var(os_name: &str) -> &'static str {
    if os_name.contains("Darwin") {
        DARWIN_LIBRARY_PATH
    } else {
        ELF_LIBRARY_PATH
    }
}

/// OS-family tag for the machine this binary was built for, used when
/// nothing else names one: `<kernel>-<arch>`, e.g. `Linux-x86_64`.
#[must_use]
pub fn default_os_name() -> String {
    let kernel = match std::env::consts::OS {
        "linux" => "Linux",
        "macos" => "Darwin",
        "freebsd" => "FreeBSD",
        "netbsd" => "NetBSD",
        "openbsd" => "OpenBSD",
        "solaris" => "SunOS",
        other => other,
    };
    let arch = match std::env::consts::ARCH {
        "aarch64" if kernel == "Darwin" => "arm64",
        other => other,
    };
    format!("{kernel}-{arch}")
}
