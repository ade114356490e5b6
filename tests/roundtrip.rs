//! Rendering a parsed system and parsing it again is a fixpoint.

use quickcheck::{Arbitrary, Gen, QuickCheck};
use reactions::{
    equation::parser::{parse_with_options, ParseOptions},
    parse, MergePolicy, System,
};

const SYMBOLS: &[&str] = &["H", "He", "C", "N", "O", "Na", "Cl", "Fe", "U"];

/// Source text for a valid reaction system, written in any of the accepted
/// spellings.
#[derive(Debug, Clone)]
struct Source(String);

fn pick(g: &mut Gen, range: std::ops::RangeInclusive<u32>) -> u32 {
    range.start() + u32::arbitrary(g) % (range.end() - range.start() + 1)
}

fn molecule(g: &mut Gen) -> String {
    let mut text = String::new();
    for _ in 0..pick(g, 1..=3) {
        text.push_str(g.choose(SYMBOLS).unwrap());
        match pick(g, 0..=3) {
            0 => {}
            1 => text.push_str(&format!("_{}", pick(g, 1..=9))),
            2 => text.push_str(&format!("_{{{}}}", pick(g, 1..=120))),
            _ => text.push_str(&pick(g, 1..=30).to_string()),
        }
    }
    text
}

fn side(g: &mut Gen) -> String {
    let terms: Vec<String> = (0..pick(g, 1..=3))
        .map(|_| match pick(g, 0..=2) {
            0 => molecule(g),
            1 => format!("{}{}", pick(g, 1..=20), molecule(g)),
            _ => format!("{} {}", pick(g, 1..=20), molecule(g)),
        })
        .collect();
    terms.join(*g.choose(&[" + ", "+"]).unwrap())
}

impl Arbitrary for Source {
    fn arbitrary(g: &mut Gen) -> Self {
        let reactions: Vec<String> = (0..pick(g, 1..=3))
            .map(|_| {
                let arrow = *g.choose(&[r" \rightarrow ", "->"]).unwrap();
                format!("{}{arrow}{}", side(g), side(g))
            })
            .collect();
        Source(reactions.join(*g.choose(&["\\\\\n", "\\\\ \n"]).unwrap()))
    }
}

fn render(source: &str) -> String {
    parse(source).value.to_string()
}

#[test]
fn prop_render_parse_fixpoint() {
    fn property(source: Source) -> bool {
        let once = render(&source.0);
        render(&once) == once
    }

    QuickCheck::new()
        .tests(300)
        .quickcheck(property as fn(Source) -> bool);
}

#[test]
fn prop_generated_sources_parse_cleanly() {
    fn property(source: Source) -> bool {
        let parsed = parse(&source.0);
        parsed.is_clean() && !parsed.value.is_empty()
    }

    QuickCheck::new()
        .tests(300)
        .quickcheck(property as fn(Source) -> bool);
}

#[test]
fn prop_reparse_is_structurally_equal() {
    fn property(source: Source) -> bool {
        [MergePolicy::Distinct, MergePolicy::Combine]
            .into_iter()
            .all(|merge| {
                let options = ParseOptions { merge };
                let system: System = parse_with_options(&source.0, options).value;
                parse_with_options(&system.to_string(), options).value == system
            })
    }

    QuickCheck::new()
        .tests(300)
        .quickcheck(property as fn(Source) -> bool);
}

#[test]
fn test_canonical_spellings() {
    let cases = [
        (r"H_{10} -> H", r"H_{10} \rightarrow H"),
        ("2H2+O2->2H2O", r"2H_2 + O_2 \rightarrow 2H_2O"),
        ("1Fe_1 + 1O_{2} -> FeO_2", r"Fe + O_2 \rightarrow FeO_2"),
        ("U235 -> U", r"U_{235} \rightarrow U"),
    ];
    for (source, expected) in cases {
        let once = render(source);
        assert_eq!(once, expected);
        assert_eq!(render(&once), once);
    }
}
