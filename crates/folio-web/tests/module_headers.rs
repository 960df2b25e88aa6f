//! Every source module forbids unsafe code.

use std::fs;
use std::path::Path;

#[test]
fn every_module_forbids_unsafe() {
    let src = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut checked = 0;
    for entry in fs::read_dir(&src).unwrap() {
        let path = entry.unwrap().path();
        if path.extension().and_then(|e| e.to_str()) != Some("rs") {
            continue;
        }
        let text = fs::read_to_string(&path).unwrap();
        assert!(
            text.starts_with("#![forbid(unsafe_code)]"),
            "{} is missing the forbid(unsafe_code) header",
            path.display()
        );
        checked += 1;
    }
    assert!(checked >= 15);
}
