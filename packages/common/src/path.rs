use path_clean::PathClean;
use std::path::{Component, Path, PathBuf};

/**
    Makes a path absolute and then cleans it.

    Relative paths are resolved against `cwd`. The result contains no `.` or
    `..` components, so two spellings of the same location compare equal.
*/
pub fn absolutize(path: impl AsRef<Path>, cwd: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_relative() {
        cwd.as_ref().join(path).clean()
    } else {
        path.clean()
    }
}

/**
    Appends `relative` below `root` and cleans the result.

    Unlike [`Path::join`], a leading root or drive prefix in `relative` does
    not replace `root`: `join_under("/src", "/index.js")` is `/src/index.js`.
    Parent components are resolved lexically and may climb out of `root`.
*/
pub fn join_under(root: impl AsRef<Path>, relative: impl AsRef<Path>) -> PathBuf {
    let mut joined = root.as_ref().to_path_buf();
    for component in relative.as_ref().components() {
        match component {
            Component::Normal(part) => joined.push(part),
            Component::ParentDir => joined.push(".."),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    joined.clean()
}

/**
    Builds a relative module specifier that reaches `target` from `from_dir`.

    Segments are always separated by `/`. The specifier starts with `../`
    when it climbs out of `from_dir` and with `./` otherwise.

    Returns `None` when no relative path exists between the two, such as
    paths on different drives.
*/
pub fn module_specifier(from_dir: impl AsRef<Path>, target: impl AsRef<Path>) -> Option<String> {
    let relative = pathdiff::diff_paths(target, from_dir)?;
    if relative.has_root() || relative.is_absolute() {
        return None;
    }

    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => segments.push(part.to_string_lossy()),
            Component::ParentDir => segments.push("..".into()),
            Component::CurDir => {}
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    let joined = segments.join("/");
    if segments.first().is_some_and(|first| first == "..") {
        Some(joined)
    } else {
        Some(format!("./{}", joined))
    }
}
