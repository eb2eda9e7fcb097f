use tlink::Lexer;

fn assert(code: &str, expects: &[&str]) {
    let tokens: Vec<_> = Lexer::new(code).collect();

    println!(" {code}");
    for (idx, token) in tokens.iter().enumerate() {
        println!("{:>2}: {:?} at {}", idx, token.text, token.pos);
    }

    let texts: Vec<_> = tokens.iter().map(|t| t.text).collect();
    assert_eq!(texts, expects);
}

macro_rules! case {
    ($name:ident, $code:expr, $expect:expr) => {
        #[test]
        fn $name() {
            assert($code, &$expect);
        }
    };
}

case!(empty, "", [] as [&str; 0]);
case!(only_separators, " ,.;:\t\r\n", [] as [&str; 0]);
case!(count, "42", ["42"]);
case!(pair, "xy 2", ["xy", "2"]);
case!(instruction_pairs, "R 1004  I 5678", ["R", "1004", "I", "5678"]);
case!(underscore, "my_sym 3", ["my_sym", "3"]);
case!(punctuation, "(xy,2);[z]", ["xy", "2", "z"]);
case!(newlines, "1\n2\r\n3", ["1", "2", "3"]);
case!(mixed_run, "R1004", ["R1004"]);
