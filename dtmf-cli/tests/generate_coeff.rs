use assert_cmd::Command;

const BLOCK_8K: [&str; 18] = [
    "sampling rate 8000",
    "27978",
    "26955",
    "25700",
    "24218",
    "19072",
    "16324",
    "13084",
    "9314",
    "15013",
    "11582",
    "7549",
    "3032",
    "-10565",
    "-16502",
    "-22317",
    "-27471",
    "",
];

fn report() -> String {
    let output = Command::cargo_bin("generate-coeff")
        .unwrap()
        .output()
        .expect("run generate-coeff");
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn emits_four_blocks_in_rate_order() {
    let stdout = report();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4 * 18);
    let headers: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|l| l.starts_with("sampling rate"))
        .collect();
    assert_eq!(
        headers,
        [
            "sampling rate 8000",
            "sampling rate 16000",
            "sampling rate 44000",
            "sampling rate 44100"
        ]
    );
    for block in lines.chunks(18) {
        assert!(block[0].starts_with("sampling rate "));
        for coeff in &block[1..17] {
            let v: i32 = coeff.parse().unwrap();
            assert!((-32767..=32767).contains(&v));
        }
        assert_eq!(block[17], "");
    }
}

#[test]
fn first_block_matches_golden_values() {
    let stdout = report();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(&lines[..18], &BLOCK_8K[..]);
}

#[test]
fn last_block_for_44100() {
    let stdout = report();
    let lines: Vec<&str> = stdout.lines().collect();
    let last = &lines[54..];
    assert_eq!(last[0], "sampling rate 44100");
    assert_eq!(last[1], "32605");
    assert_eq!(last[16], "29283");
}

#[test]
fn stdout_is_unaffected_by_logging() {
    let output = Command::cargo_bin("generate-coeff")
        .unwrap()
        .env("RUST_LOG", "trace")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), report());
}
