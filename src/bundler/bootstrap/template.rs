//! Second-stage bootstrap template and Python literal rendering.
//!
//! The template is rendered with Handlebars and HTML escaping disabled; every
//! placeholder receives a ready-made Python literal from the helpers below.
//! The emitted program must stay runnable on the oldest supported runtime
//! (3.5), so it uses no f-strings.

/// Bootstrap program run once on the end-user machine.
pub const BOOTSTRAP_TEMPLATE: &str = r#"# -*- coding: utf-8 -*-
# Generated by kodegen_bundler_pyembed. Started by install.bat; do not remove.

import os
import subprocess
from pathlib import Path

HERE = Path(__file__).parent.resolve()
os.chdir(str(HERE))
BUILD_DIR = HERE.parent.resolve()
PY_DIR = (BUILD_DIR / {{runtime_dir}}).resolve()
PROJECT_DIRS = {{project_dirs}}
# (path relative to BUILD_DIR, shortcut name, flavor, declared in a project)
ENTRY_POINTS = {{entry_points}}
PYC_ONLY = {{pyc_only}}
INSTALL_PIP = {{install_pip}}
INSTALL_DEPENDENCIES = {{install_dependencies}}
COMPILE = {{compile}}
WELCOME_MESSAGE = {{welcome_message}}
GOODBYE_MESSAGE = {{goodbye_message}}
LOG_FILE = 'install.log'


def python_exe():
    return str(PY_DIR / 'python.exe')


def run_logged(title, args):
    with open(LOG_FILE, 'a') as log:
        log.write('*** %s ***\n' % title)
        log.flush()
        subprocess.run(args, stdout=log, stderr=subprocess.STDOUT)
        log.write('*******************\n\n')


def install_pip():
    if INSTALL_PIP:
        run_logged('install pip', [python_exe(), 'get-pip.py', '--no-cache'])


def install_dependencies():
    if INSTALL_DEPENDENCIES:
        run_logged('install dependencies',
                   [python_exe(), '-m', 'pip', 'install',
                    '-r', 'requirements.txt', '--no-cache'])


def compile_modules():
    if not COMPILE:
        return
    for name in PROJECT_DIRS:
        target = (BUILD_DIR / name).resolve()
        args = [python_exe(), '-m', 'compileall', str(target)]
        if PYC_ONLY:
            args.append('-b')
        run_logged('compile ' + name, args)
        if PYC_ONLY:
            for source in target.glob('**/*.py'):
                source.unlink()


def shortcut_target(path, flavor, in_project):
    target = BUILD_DIR / path
    if PYC_ONLY and flavor and in_project:
        target = target.with_suffix('.pyc')
    return target.resolve()


def make_shortcuts():
    if not ENTRY_POINTS:
        return
    lines = ['$Shell = New-Object -ComObject WScript.Shell', '']
    for path, name, flavor, in_project in ENTRY_POINTS:
        target = shortcut_target(path, flavor, in_project)
        lines.append('$Shortcut = $Shell.CreateShortcut("%s/%s.lnk")' % (BUILD_DIR, name))
        if flavor:
            interpreter = 'pythonw.exe' if flavor == 'pyw' else 'python.exe'
            lines.append('$Shortcut.TargetPath = "`"%s`""' % (PY_DIR / interpreter))
            lines.append('$Shortcut.Arguments = "`"%s`""' % target)
            lines.append('$Shortcut.WorkingDirectory = "%s"' % target.parent)
        else:
            lines.append('$Shortcut.TargetPath = "`"%s`""' % target)
        lines.append('$Shortcut.Save()')
        lines.append('')
    script = HERE / 'make_shortcuts.ps1'
    if script.exists():
        script.unlink()
    script.write_text('\n'.join(lines))
    subprocess.run(['powershell', '-ExecutionPolicy', 'Bypass', str(script)])


def post_deploy_action():
    # Custom steps for the user machine go here, in target-runtime syntax.
    pass


if __name__ == '__main__':
    print(WELCOME_MESSAGE)
    install_pip()
    install_dependencies()
    compile_modules()
    make_shortcuts()
    post_deploy_action()
    input(GOODBYE_MESSAGE)
"#;

/// Renders a Python string literal (single-quoted, `repr`-style escapes).
pub fn py_str(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Renders a Python boolean.
pub fn py_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// Renders a Python list from already-rendered items.
pub fn py_list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let items: Vec<String> = items.into_iter().map(|s| s.as_ref().to_string()).collect();
    format!("[{}]", items.join(", "))
}
