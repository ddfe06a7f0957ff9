// setenv-rs: Build Environment Script Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};

use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use super::build::{BuildEnv, BuildOptions};
use super::header::Header;
use super::platform::{default_os_name, library_path_var};
use super::render::{ScriptContext, render};
use super::shell::{Shell, Shells, escape, quote};
use super::table::{Defaults, Lookup, SUBSYSTEMS, ValueSource, status};
use super::writer::{ensure_dir, write_script};
use super::{SetenvRequest, generate};
use crate::core::env::container::Env;

const LINUX: &str = "Linux_RHEL9-x86_64-gcc11";
const DARWIN: &str = "Darwin_macosx14-arm64-clang15";

fn header(os_name: &str) -> Header {
    Header {
        generated_at: "03:04PM on October 16, 2026".to_string(),
        user: "builder".to_string(),
        host: "farm01".to_string(),
        platform: "Linux farm01 5.14.0 x86_64 GNU/Linux".to_string(),
        os_name: os_name.to_string(),
    }
}

fn build_env(os_name: &str) -> BuildEnv {
    BuildEnv::builder()
        .install_dir(format!("/group/halld/{os_name}"))
        .os_name(os_name)
        .halld_home("/group/halld")
        .build()
}

fn context(os_name: &str, vars: &[(&str, &str)]) -> ScriptContext {
    ScriptContext {
        header: header(os_name),
        build: build_env(os_name),
        env: vars.iter().copied().collect(),
        defaults: Defaults::builtin(),
    }
}

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

const MINIMAL_SH: &str = r##"#!/bin/bash
#
# This file was generated by setenv-rs (see `setenv generate --help`)
#
# Generation date: 03:04PM on October 16, 2026
#
#       User: builder
#       Host: farm01
#   platform: Linux farm01 5.14.0 x86_64 GNU/Linux
# BMS_OSNAME: Linux_RHEL9-x86_64-gcc11


# Make sure LD_LIBRARY_PATH is set
if [ -z "$LD_LIBRARY_PATH" ]; then
   export LD_LIBRARY_PATH=""
fi

# Make sure PYTHONPATH is set
if [ -z "$PYTHONPATH" ]; then
   export PYTHONPATH=""
fi

# HDDS
export HDDS_HOME=$HOME/hdds

# JANA
export JANA_HOME=$HOME/jana
export JANA_CALIB_URL=$HOME/halld/calib
[ ! -z "$HDDS_HOME" ] && export JANA_GEOMETRY_URL=xmlfile://${HDDS_HOME}/main_HDDS.xml
export JANA_PLUGIN_PATH=${JANA_HOME}/plugins:${JANA_HOME}/lib
export PATH=${JANA_HOME}/bin:${PATH}

# HALLD
export HALLD_HOME=/group/halld
export BMS_OSNAME=Linux_RHEL9-x86_64-gcc11
export PATH=${HALLD_HOME}/${BMS_OSNAME}/bin:${PATH}
export JANA_PLUGIN_PATH=${HALLD_HOME}/${BMS_OSNAME}/plugins:${JANA_PLUGIN_PATH}
export LD_LIBRARY_PATH=${HALLD_HOME}/${BMS_OSNAME}/lib:${LD_LIBRARY_PATH}
export PYTHONPATH=${HALLD_HOME}/${BMS_OSNAME}/lib/python:${PYTHONPATH}

# ROOT
export ROOTSYS=$HOME/root
export PATH=${ROOTSYS}/bin:${PATH}
export LD_LIBRARY_PATH=${ROOTSYS}/lib:${LD_LIBRARY_PATH}

# Xerces
export XERCESCROOT=$HOME/xerces
export PATH=${XERCESCROOT}/bin:${PATH}
export LD_LIBRARY_PATH=${XERCESCROOT}/lib:${LD_LIBRARY_PATH}

"##;

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn test_render_sh_with_defaults_only() {
    let script = render(Shell::Sh, &context(LINUX, &[]));
    assert_eq!(script, MINIMAL_SH);
}

#[test]
fn test_render_csh_with_defaults_only() {
    let script = render(Shell::Csh, &context(LINUX, &[]));
    let lines: Vec<&str> = script.lines().collect();

    assert_eq!(lines[0], "#!/bin/tcsh");
    for expected in [
        "if ( ! $?LD_LIBRARY_PATH ) then",
        "   setenv LD_LIBRARY_PATH",
        "endif",
        "if ( ! $?PYTHONPATH ) then",
        "setenv HDDS_HOME $HOME/hdds",
        "if ( $?HDDS_HOME ) then",
        "   setenv JANA_GEOMETRY_URL xmlfile://${HDDS_HOME}/main_HDDS.xml",
        "setenv HALLD_HOME /group/halld",
        "setenv LD_LIBRARY_PATH ${HALLD_HOME}/${BMS_OSNAME}/lib:${LD_LIBRARY_PATH}",
        "setenv ROOTSYS $HOME/root",
        "setenv XERCESCROOT $HOME/xerces",
    ] {
        assert!(lines.contains(&expected), "missing line: {expected}");
    }
    assert!(!script.contains("export "));
}

#[test]
fn test_render_is_deterministic() {
    let vars = [("CCDB_HOME", "/apps/ccdb"), ("ETROOT", "/apps/et")];
    for shell in [Shell::Csh, Shell::Sh] {
        let first = render(shell, &context(LINUX, &vars));
        let second = render(shell, &context(LINUX, &vars));
        assert_eq!(first, second);
    }
}

#[test]
fn test_render_darwin_uses_dyld_everywhere() {
    let vars = [
        ("RCDB_HOME", "/apps/rcdb"),
        ("CERN", "/apps/cernlib"),
        ("EVIOROOT", "/apps/evio"),
        ("ETROOT", "/apps/et"),
    ];
    for shell in [Shell::Csh, Shell::Sh] {
        let script = render(shell, &context(DARWIN, &vars));
        let lib_lines: Vec<&str> = script
            .lines()
            .filter(|l| l.contains("LIBRARY_PATH"))
            .collect();

        // ensure-defined block, HALLD, RCDB, ROOT, CERNLIB, Xerces, EVIO, ET
        assert!(lib_lines.len() >= 9, "{shell}: {lib_lines:#?}");
        for line in lib_lines {
            let bare = line.replace("DYLD_LIBRARY_PATH", "");
            assert!(!bare.contains("LD_LIBRARY_PATH"), "{shell}: {line}");
        }
    }
}

#[test]
fn test_render_linux_never_mentions_dyld() {
    let vars = [("RCDB_HOME", "/apps/rcdb"), ("EVIOROOT", "/apps/evio")];
    for shell in [Shell::Csh, Shell::Sh] {
        let script = render(shell, &context(LINUX, &vars));
        assert!(!script.contains("DYLD"));
        assert!(script.contains("LD_LIBRARY_PATH"));
    }
}

#[test]
fn test_render_omits_unset_optional_blocks() {
    let script = render(Shell::Sh, &context(LINUX, &[]));
    for absent in [
        "CLANG", "CCDB", "RCDB", "CERN", "JAVAROOT", "EVIO", "ETROOT", "# ET",
    ] {
        assert!(!script.contains(absent), "unexpected {absent}");
    }
}

#[test]
fn test_render_ccdb_block() {
    let vars = [("CCDB_HOME", "/apps/ccdb")];

    let sh = render(Shell::Sh, &context(LINUX, &vars));
    assert!(sh.contains(
        "# CCDB\n\
         export CCDB_HOME=/apps/ccdb\n\
         if [ -e $CCDB_HOME/environment.bash ]; then\n  \
         . $CCDB_HOME/environment.bash\n\
         fi\n\
         export CCDB_CONNECTION=${JANA_CALIB_URL}\n\n"
    ));

    let csh = render(Shell::Csh, &context(LINUX, &vars));
    assert!(csh.contains(
        "# CCDB\n\
         setenv CCDB_HOME /apps/ccdb\n\
         if ( -e $CCDB_HOME/environment.csh ) then\n  \
         source $CCDB_HOME/environment.csh\n\
         endif\n\
         setenv CCDB_CONNECTION ${JANA_CALIB_URL}\n\n"
    ));
}

#[test]
fn test_render_rcdb_uses_default_connection() {
    let script = render(Shell::Sh, &context(LINUX, &[("RCDB_HOME", "/apps/rcdb")]));
    assert!(script.contains("export RCDB_CONNECTION=mysql://rcdb@hallddb.jlab.org/rcdb\n"));
    assert!(script.contains("export LD_LIBRARY_PATH=${RCDB_HOME}/cpp/lib:${LD_LIBRARY_PATH}\n"));
    assert!(script.contains("export PYTHONPATH=${RCDB_HOME}/python:${PYTHONPATH}\n"));
    assert!(script.contains("export PATH=${RCDB_HOME}/bin:${RCDB_HOME}/cpp/bin:${PATH}\n"));
}

#[test]
fn test_render_cernlib_level() {
    let default_level = render(Shell::Csh, &context(LINUX, &[("CERN", "/apps/cernlib")]));
    assert!(default_level.contains("setenv CERN_LEVEL 2006\n"));
    assert!(default_level.contains("setenv PATH ${CERN}/${CERN_LEVEL}/bin:${PATH}\n"));

    let explicit = render(
        Shell::Csh,
        &context(LINUX, &[("CERN", "/apps/cernlib"), ("CERN_LEVEL", "2005")]),
    );
    assert!(explicit.contains("setenv CERN_LEVEL 2005\n"));
}

#[test]
fn test_render_environment_overrides_default() {
    let script = render(Shell::Sh, &context(LINUX, &[("ROOTSYS", "/opt/root/6.30")]));
    assert!(script.contains("export ROOTSYS=/opt/root/6.30\n"));
    assert!(!script.contains("$HOME/root"));
}

#[test]
fn test_render_block_order_follows_table() {
    let vars = [
        ("CLANGROOT", "/apps/clang"),
        ("CCDB_HOME", "/apps/ccdb"),
        ("RCDB_HOME", "/apps/rcdb"),
        ("CERN", "/apps/cernlib"),
        ("JAVAROOT", "/apps/java"),
        ("EVIOROOT", "/apps/evio"),
        ("ETROOT", "/apps/et"),
    ];
    let script = render(Shell::Sh, &context(LINUX, &vars));
    let labels: Vec<&str> = script
        .lines()
        .filter_map(|l| l.strip_prefix("# "))
        .filter(|l| SUBSYSTEMS.iter().any(|s| s.label == *l))
        .collect();

    insta::assert_debug_snapshot!(labels, @r#"
    [
        "CLANG-LLVM C++ compiler",
        "HDDS",
        "JANA",
        "HALLD",
        "CCDB",
        "RCDB",
        "ROOT",
        "CERNLIB",
        "Java",
        "Xerces",
        "EVIO",
        "ET",
    ]
    "#);
}

#[test]
fn test_render_clang_sources_dialect_script() {
    let vars = [("CLANGROOT", "/apps/clang")];
    let sh = render(Shell::Sh, &context(LINUX, &vars));
    assert!(sh.contains("export CLANGROOT=/apps/clang\nif [ -e ${CLANGROOT}/setenv.sh ]; then\n"));

    let csh = render(Shell::Csh, &context(LINUX, &vars));
    assert!(csh.contains("  source ${CLANGROOT}/setenv.csh\n"));
}

#[test]
fn test_render_without_defaults_skips_assignment() {
    let mut ctx = context(LINUX, &[]);
    ctx.defaults = Defaults::none();
    let script = render(Shell::Sh, &ctx);

    assert!(!script.contains("HDDS_HOME=$HOME"));
    assert!(!script.contains("export ROOTSYS="));
    assert!(script.contains("export PATH=${ROOTSYS}/bin:${PATH}\n"));
}

#[test]
fn test_render_environment_values_are_literal() {
    let vars = [
        ("JAVAROOT", "/Applications/Java Home"),
        ("CERN", "/opt/cern(2006)"),
        ("EVIOROOT", "/opt/evio;rm -rf ~"),
        ("ETROOT", "/opt/o'brien&co"),
        ("ROOTSYS", "$HOME/root"),
    ];
    let sh = render(Shell::Sh, &context(LINUX, &vars));
    for expected in [
        "export JAVAROOT='/Applications/Java Home'\n",
        "export CERN='/opt/cern(2006)'\n",
        "export EVIOROOT='/opt/evio;rm -rf ~'\n",
        "export ETROOT='/opt/o'\\''brien&co'\n",
        "export ROOTSYS='$HOME/root'\n",
    ] {
        assert!(sh.contains(expected), "missing {expected}");
    }

    let csh = render(Shell::Csh, &context(LINUX, &vars));
    assert!(csh.contains("setenv CERN '/opt/cern(2006)'\n"));
}

#[test]
fn test_render_defaults_keep_expanding() {
    let mut ctx = context(LINUX, &[]);
    ctx.defaults = Defaults::builtin().with("ROOTSYS", "$HOME/ROOT 6");
    let script = render(Shell::Sh, &ctx);
    assert!(script.contains("export ROOTSYS=\"$HOME/ROOT 6\"\n"));
}

// =============================================================================
// Shell dialects
// =============================================================================

#[test]
fn test_shell_statements() {
    let statements: Vec<String> = [Shell::Csh, Shell::Sh]
        .into_iter()
        .flat_map(|shell| {
            [
                shell.set("ROOTSYS", "$HOME/root"),
                shell.prepend("PATH", "${ROOTSYS}/bin"),
                shell.set_guarded("HDDS_HOME", "X", "y"),
            ]
        })
        .collect();

    insta::assert_debug_snapshot!(statements, @r#"
    [
        "setenv ROOTSYS $HOME/root",
        "setenv PATH ${ROOTSYS}/bin:${PATH}",
        "if ( $?HDDS_HOME ) then\n   setenv X y\nendif",
        "export ROOTSYS=$HOME/root",
        "export PATH=${ROOTSYS}/bin:${PATH}",
        "[ ! -z \"$HDDS_HOME\" ] && export X=y",
    ]
    "#);
}

#[test]
fn test_shell_parse() {
    assert_eq!("csh".parse::<Shell>().unwrap(), Shell::Csh);
    assert_eq!("TCSH".parse::<Shell>().unwrap(), Shell::Csh);
    assert_eq!("bash".parse::<Shell>().unwrap(), Shell::Sh);
    assert!("fish".parse::<Shell>().is_err());
}

#[test]
fn test_shells_dialect_order() {
    let all: Vec<Shell> = Shells::default().dialects().collect();
    assert_eq!(all, [Shell::Csh, Shell::Sh]);

    let only_sh: Vec<Shell> = Shells::from(Shell::Sh).dialects().collect();
    assert_eq!(only_sh, [Shell::Sh]);

    let collected: Shells = [Shell::Sh, Shell::Csh, Shell::Sh].into_iter().collect();
    assert_eq!(collected, Shells::all());
}

#[test]
fn test_quote() {
    assert_eq!(quote("$HOME/root"), "$HOME/root");
    assert_eq!(quote("${A}/lib:${B}"), "${A}/lib:${B}");
    assert_eq!(quote("a b"), "\"a b\"");
    assert_eq!(quote("say \"hi\""), r#""say "'"'"hi"'"'"""#);
    assert_eq!(quote("a`b"), r#""a"'`'"b""#);
}

#[test]
fn test_escape() {
    assert_eq!(escape("/group/halld/Linux_RHEL9-x86_64"), "/group/halld/Linux_RHEL9-x86_64");
    assert_eq!(escape(""), "''");
    assert_eq!(escape("$HOME"), "'$HOME'");
    assert_eq!(escape("a;b&c"), "'a;b&c'");
    assert_eq!(escape("it's"), r"'it'\''s'");
}

#[test]
fn test_library_path_var() {
    assert_eq!(library_path_var(LINUX), "LD_LIBRARY_PATH");
    assert_eq!(library_path_var(DARWIN), "DYLD_LIBRARY_PATH");
    assert_eq!(library_path_var("darwin"), "LD_LIBRARY_PATH");
    assert!(default_os_name().contains('-'));
}

// =============================================================================
// Build environment
// =============================================================================

#[test]
fn test_build_options_from_install_dir() {
    let build = BuildOptions::builder()
        .with_install_dir(PathBuf::from("/group/halld/Linux_x"))
        .with_os_name("Linux_x".to_string())
        .build()
        .resolve(&Env::new(), Path::new("/work/src"));

    assert_eq!(build.halld_home(), Path::new("/group/halld"));
    assert_eq!(build.install_dir(), Path::new("/group/halld/Linux_x"));
}

#[test]
fn test_build_options_from_environment_and_cwd() {
    let env: Env = [("BMS_OSNAME", "Darwin_y")].into_iter().collect();
    let build = BuildOptions::default().resolve(&env, Path::new("/work/halld/src"));

    assert_eq!(build.os_name(), "Darwin_y");
    assert_eq!(build.halld_home(), Path::new("/work/halld"));
    assert_eq!(build.install_dir(), Path::new("/work/halld/Darwin_y"));
    assert_eq!(build.library_path_var(), "DYLD_LIBRARY_PATH");
}

#[test]
fn test_build_options_precedence() {
    let cli = BuildOptions::builder()
        .with_os_name("from_cli".to_string())
        .build();
    let config = BuildOptions::builder()
        .with_os_name("from_config".to_string())
        .with_halld_home(PathBuf::from("/cfg/home"))
        .build();
    let env: Env = [("BMS_OSNAME", "from_env"), ("HALLD_HOME", "/env/home")]
        .into_iter()
        .collect();

    let build = cli.or(config).resolve(&env, Path::new("/"));
    assert_eq!(build.os_name(), "from_cli");
    assert_eq!(build.halld_home(), Path::new("/cfg/home"));
    assert_eq!(build.install_dir(), Path::new("/cfg/home/from_cli"));
}

#[test]
fn test_build_options_relative_paths_become_absolute() {
    let cwd = Path::new("/work/src");

    let from_install = BuildOptions::builder()
        .with_install_dir(PathBuf::from("out/Linux"))
        .with_os_name("Linux".to_string())
        .build()
        .resolve(&Env::new(), cwd);
    assert_eq!(from_install.install_dir(), Path::new("/work/src/out/Linux"));
    assert_eq!(from_install.halld_home(), Path::new("/work/src/out"));

    let from_home = BuildOptions::builder()
        .with_halld_home(PathBuf::from("."))
        .with_os_name("Linux".to_string())
        .build()
        .resolve(&Env::new(), cwd);
    assert_eq!(from_home.halld_home(), Path::new("/work/src"));
    assert_eq!(from_home.install_dir(), Path::new("/work/src/Linux"));

    let env: Env = [("HALLD_HOME", "../halld")].into_iter().collect();
    let from_env = BuildOptions::builder()
        .with_os_name("Linux".to_string())
        .build()
        .resolve(&env, cwd);
    assert_eq!(from_env.halld_home(), Path::new("/work/halld"));

    let script = render(
        Shell::Sh,
        &ScriptContext {
            header: header("Linux"),
            build: from_install,
            env: Env::new(),
            defaults: Defaults::builtin(),
        },
    );
    assert!(script.contains("export HALLD_HOME=/work/src/out\n"));
}

#[test]
fn test_build_options_empty_os_name_falls_back() {
    let env: Env = [("BMS_OSNAME", "")].into_iter().collect();
    let build = BuildOptions::default().resolve(&env, Path::new("/a/b"));
    assert_eq!(build.os_name(), default_os_name());
}

// =============================================================================
// Status table
// =============================================================================

#[test]
fn test_status_reports_sources() {
    let ctx = context(LINUX, &[("ROOTSYS", "/opt/root"), ("ETROOT", "/apps/et")]);
    let lookup: Lookup<'_> = ctx.lookup();
    let report = status(&lookup);

    assert_eq!(report.len(), SUBSYSTEMS.len());
    let by_label = |label: &str| report.iter().find(|s| s.label == label).unwrap();

    assert_eq!(by_label("ROOT").source, ValueSource::Environment);
    assert_eq!(by_label("ROOT").value.as_deref(), Some("/opt/root"));
    assert_eq!(by_label("Xerces").source, ValueSource::Default);
    assert_eq!(by_label("HALLD").source, ValueSource::Derived);
    assert_eq!(by_label("ET").source, ValueSource::Environment);
    assert!(!by_label("CCDB").emitted);
    assert_eq!(by_label("CCDB").source, ValueSource::Absent);
    assert_eq!(by_label("CLANG-LLVM C++ compiler").variable, Some("CLANGROOT"));
}

#[test]
fn test_status_serializes_to_json() {
    let ctx = context(LINUX, &[]);
    let report = status(&ctx.lookup());
    let hdds = serde_json::to_value(&report[1]).unwrap();

    assert_eq!(
        hdds,
        serde_json::json!({
            "label": "HDDS",
            "variable": "HDDS_HOME",
            "emitted": true,
            "value": "$HOME/hdds",
            "source": "default",
        })
    );
}

// =============================================================================
// Header
// =============================================================================

#[test]
fn test_header_from_parts() {
    let now = Utc.with_ymd_and_hms(2026, 10, 16, 15, 4, 0).unwrap();
    let env: Env = [("USER", "builder"), ("HOSTNAME", "farm02")].into_iter().collect();
    let header = Header::from_parts(&now, &env, "Linux farm02", LINUX);

    assert_eq!(header.generated_at, "03:04PM on October 16, 2026");
    assert_eq!(header.user, "builder");
    assert_eq!(header.host, "farm02");

    let anonymous = Header::from_parts(&now, &Env::new(), "", LINUX);
    assert_eq!(anonymous.user, "Unknown");
    assert_eq!(anonymous.host, "Unknown");
}

#[test]
fn test_header_prefers_host_over_hostname() {
    let now = Utc.with_ymd_and_hms(2026, 1, 2, 9, 30, 0).unwrap();
    let env: Env = [("HOST", "ifarm"), ("HOSTNAME", "other")].into_iter().collect();
    let header = Header::from_parts(&now, &env, "", LINUX);

    assert_eq!(header.host, "ifarm");
    assert_eq!(header.generated_at, "09:30AM on January 02, 2026");
}

#[test]
fn test_header_keeps_values_inside_comments() {
    let now = Utc.with_ymd_and_hms(2026, 1, 2, 9, 30, 0).unwrap();
    let env: Env = [("USER", "eve\nexport PATH=/tmp/evil"), ("HOST", "farm\r\t01")]
        .into_iter()
        .collect();
    let header = Header::from_parts(&now, &env, "Linux\nx", "tag\n");

    assert_eq!(header.user, "eve export PATH=/tmp/evil");
    assert_eq!(header.host, "farm  01");
    let rendered = header.render(Shell::Sh.shebang());
    for line in rendered.lines().skip(1) {
        assert!(line.is_empty() || line.starts_with('#'), "{line}");
    }
}

// =============================================================================
// Writing
// =============================================================================

#[cfg(unix)]
#[test]
fn test_write_script_is_executable() {
    use std::os::unix::fs::PermissionsExt;

    let temp = temp_dir();
    let path = write_script(temp.path(), Shell::Sh, "#!/bin/bash\n").unwrap();

    assert_eq!(path, temp.path().join("setenv.sh"));
    let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o755);
}

#[test]
fn test_write_script_creates_missing_dirs() {
    let temp = temp_dir();
    let dir = temp.path().join("Linux_x").join("nested");
    let path = write_script(&dir, Shell::Csh, "#!/bin/tcsh\n").unwrap();

    assert_eq!(std::fs::read_to_string(path).unwrap(), "#!/bin/tcsh\n");
}

#[test]
fn test_write_script_keeps_unrelated_files() {
    let temp = temp_dir();
    std::fs::write(temp.path().join("README"), "keep me").unwrap();
    std::fs::write(temp.path().join("setenv.csh"), "old").unwrap();

    write_script(temp.path(), Shell::Csh, "new").unwrap();

    assert_eq!(std::fs::read_to_string(temp.path().join("README")).unwrap(), "keep me");
    assert_eq!(std::fs::read_to_string(temp.path().join("setenv.csh")).unwrap(), "new");
}

#[test]
fn test_ensure_dir_rejects_file() {
    let temp = temp_dir();
    let file = temp.path().join("not_a_dir");
    std::fs::write(&file, "").unwrap();

    ensure_dir(temp.path()).unwrap();
    let err = ensure_dir(&file).unwrap_err();
    assert!(err.to_string().contains("failed to create directory"));
}

// =============================================================================
// Generation
// =============================================================================

fn request(dir: &Path, dry: bool) -> SetenvRequest {
    let env: Env = [("USER", "builder"), ("CCDB_HOME", "/apps/ccdb")]
        .into_iter()
        .collect();
    SetenvRequest::builder()
        .with_build(
            BuildEnv::builder()
                .install_dir(dir)
                .os_name(LINUX)
                .halld_home("/group/halld")
                .build(),
        )
        .with_env(env)
        .with_dry(dry)
        .build()
}

#[cfg(unix)]
#[tokio::test]
async fn test_generate_writes_both_scripts() {
    let temp = temp_dir();
    let dir = temp.path().join(LINUX);

    let written = generate(&request(&dir, false)).await.unwrap();
    assert_eq!(written, [dir.join("setenv.csh"), dir.join("setenv.sh")]);

    let csh = std::fs::read_to_string(dir.join("setenv.csh")).unwrap();
    assert!(csh.starts_with("#!/bin/tcsh\n"));
    assert!(csh.contains("#       User: builder\n"));
    assert!(csh.contains("source $CCDB_HOME/environment.csh"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_generate_twice_differs_only_in_timestamp() {
    let temp = temp_dir();
    let req = request(temp.path(), false);

    generate(&req).await.unwrap();
    let first = std::fs::read_to_string(temp.path().join("setenv.sh")).unwrap();
    generate(&req).await.unwrap();
    let second = std::fs::read_to_string(temp.path().join("setenv.sh")).unwrap();

    let strip = |s: &str| {
        s.lines()
            .filter(|l| !l.starts_with("# Generation date:"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    assert_eq!(strip(&first), strip(&second));
}

#[cfg(unix)]
#[tokio::test]
async fn test_generate_dry_run_writes_nothing() {
    let temp = temp_dir();
    let dir = temp.path().join("absent");

    let written = generate(&request(&dir, true)).await.unwrap();
    assert_eq!(written.len(), 2);
    assert!(!dir.exists());
}

#[cfg(unix)]
#[tokio::test]
async fn test_mk_setenv_sh_only() {
    let temp = temp_dir();
    let build = BuildEnv::builder()
        .install_dir(temp.path())
        .os_name(LINUX)
        .halld_home("/group/halld")
        .build();

    let path = super::mk_setenv_sh(build, Env::new()).await.unwrap();
    assert_eq!(path, temp.path().join("setenv.sh"));
    assert!(!temp.path().join("setenv.csh").exists());
}
