use typographer_core::{
    Config, Inline, QuotePreset, StyleClass, TokenKind, process, resolve_typography, typographize,
};

fn kinds(text: &str, config: &Config) -> Vec<TokenKind> {
    resolve_typography(text, config)
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn ellipsis_becomes_one_glyph() {
    assert_eq!(
        typographize("Wait... really?", &Config::default()).unwrap(),
        "Wait\u{2026} really?"
    );
}

#[test]
fn closed_double_quotes_are_tagged() {
    let tokens = resolve_typography(r#"She said "hello there"."#, &Config::default()).unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].replacement, "\u{201C}");
    assert_eq!(tokens[0].style.span_start, Some(StyleClass::DoubleQuote));
    assert_eq!(tokens[0].closer(), Some(1));
    assert_eq!(tokens[1].replacement, "\u{201D}");
    assert!(tokens[1].style.span_end);
    assert_eq!(tokens[1].opener(), Some(0));
}

#[test]
fn unclosed_double_quote_runs_on() {
    let tokens = resolve_typography(r#"He began "but never finished"#, &Config::default()).unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::DoubleRunon);
    assert_eq!(tokens[0].style.span_start, Some(StyleClass::DoubleQuoteRunon));
    assert_eq!(tokens[0].style.glyph, Some(StyleClass::DoubleOpenGlyph));
}

#[test]
fn typographic_text_is_left_alone() {
    let once = typographize(r#"It's "done"... 10--20 -- ok --- fine"#, &Config::default()).unwrap();
    assert!(resolve_typography(&once, &Config::default()).unwrap().is_empty());
    assert_eq!(typographize(&once, &Config::default()).unwrap(), once);
}

#[test]
fn digit_range_gets_hair_spaces() {
    assert_eq!(
        typographize("pages 10--20", &Config::default()).unwrap(),
        "pages 10\u{200A}\u{2013}\u{200A}20"
    );
}

#[test]
fn escaped_arrow_is_untouched() {
    assert_eq!(typographize("x --&gt; y", &Config::default()).unwrap(), "x --&gt; y");
}

#[test]
fn apostrophes_and_single_quotes() {
    let cfg = Config::default();
    assert_eq!(typographize("don't", &cfg).unwrap(), "don\u{2019}t");
    assert_eq!(typographize("'90s", &cfg).unwrap(), "\u{2019}90s");

    let tokens = resolve_typography("'quoted'", &cfg).unwrap();
    assert_eq!(
        tokens.iter().map(|t| t.replacement.as_str()).collect::<Vec<_>>(),
        vec!["\u{2018}", "\u{2019}"]
    );
    assert_eq!(tokens[0].style.span_start, Some(StyleClass::SingleQuote));
    assert!(tokens[1].style.span_end);
}

#[test]
fn disabled_category_keeps_its_patterns() {
    let cfg = Config {
        dashes: false,
        ..Config::default()
    };
    assert_eq!(
        typographize("a -- b... c", &cfg).unwrap(),
        "a -- b\u{2026} c"
    );

    let cfg = Config {
        ellipses: false,
        double_quotes: false,
        ..Config::default()
    };
    assert_eq!(kinds(r#""a"... b -- c"#, &cfg), vec![TokenKind::EnDash]);
}

#[test]
fn preset_glyphs_are_used() {
    let cfg = Config::default().with_preset(QuotePreset::Guillemets);
    assert_eq!(
        typographize(r#""oui""#, &cfg).unwrap(),
        "\u{00AB}oui\u{00BB}"
    );
}

#[test]
fn tokens_are_ordered_and_disjoint() {
    let tokens = resolve_typography(
        r#"'Tis "odd"--isn't it... 1990--2000 'really' --- "yes"#,
        &Config::default(),
    )
    .unwrap();
    for pair in tokens.windows(2) {
        assert!(pair[0].location + pair[0].length <= pair[1].location);
    }
}

#[test]
fn process_styles_an_inline_tree() {
    let mut nodes: Vec<Inline<&str>> = vec![
        Inline::text("say "),
        Inline::element("em", vec![Inline::text("'quoted'")]),
    ];
    let applied = process(&mut nodes, &Config::default()).unwrap();
    assert_eq!(applied, 2);
    assert_eq!(
        nodes,
        vec![
            Inline::text("say "),
            Inline::element(
                "em",
                vec![Inline::Styled {
                    class: StyleClass::SingleQuote,
                    children: vec![
                        Inline::Styled {
                            class: StyleClass::SingleOpenGlyph,
                            children: vec![Inline::text("\u{2018}")],
                        },
                        Inline::text("quoted"),
                        Inline::Styled {
                            class: StyleClass::SingleCloseGlyph,
                            children: vec![Inline::text("\u{2019}")],
                        },
                    ],
                }],
            ),
        ]
    );
}
