use super::*;
use crate::kb::loader::load_rules_from_sources;

#[test]
fn reload_swaps_whole_snapshot() {
    let first = current().expect("bundled rules");
    assert_eq!(first.version(), "2025.1");

    let replacement = load_rules_from_sources(
        &[(
            "tiny.toml".to_string(),
            "[meta]\nversion = \"test\"\n[[gene]]\nsymbol = \"G1\"\ndefault_diplotype = \"*1/*1\"\n[[drug]]\nname = \"X\"\ngenes = [\"G1\"]\nguideline_source = \"Local\"\n"
                .to_string(),
        )],
        "test",
    )
    .expect("tiny rules");

    let previous = reload(replacement).expect("previous snapshot");
    assert_eq!(previous.fingerprint(), first.fingerprint());
    assert_eq!(first.supported_drugs().len(), 6);

    let now = current().expect("current rules");
    assert_eq!(now.version(), "test");
    assert_eq!(now.supported_drugs(), vec!["X"]);

    let bundled = load_bundled_rules().expect("bundled rules");
    let restored = install(bundled);
    assert_eq!(current().expect("current").fingerprint(), restored.fingerprint());
}
