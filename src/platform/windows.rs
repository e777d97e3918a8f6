use std::path::PathBuf;

pub fn system_roots() -> Vec<PathBuf> {
    [
        "C:\\Windows",
        "C:\\Program Files",
        "C:\\Program Files (x86)",
        "C:\\System Volume Information",
    ]
    .iter()
    .map(PathBuf::from)
    .collect()
}
