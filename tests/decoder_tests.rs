//! Token decoder tests

use std::io::Cursor;
use std::time::Duration;

use fpga_tetris::core::PendingPieceSlot;
use fpga_tetris::serial::{DecodeLoop, ReaderSource, Step, Token, TokenDecoder};
use fpga_tetris::types::PieceKind;

#[test]
fn test_decode_plain_token() {
    let mut decoder = TokenDecoder::new();
    let token = decoder.push_all(b"12AB").unwrap();
    assert_eq!(token.value, 0x12AB);
    // 4779 % 7 == 5
    assert_eq!(token.kind, PieceKind::J);
}

#[test]
fn test_noise_resynchronises() {
    let mut decoder = TokenDecoder::new();
    let steps: Vec<Step> = b"12#AB34".iter().map(|&b| decoder.push(b)).collect();
    assert_eq!(steps[2], Step::Desync { dropped: 2 });
    assert_eq!(steps[6], Step::Token(Token::new(0xAB34)));
    // 43828 % 7 == 1
    assert_eq!(Token::new(0xAB34).kind, PieceKind::O);
}

#[test]
fn test_every_residue_maps_to_its_piece() {
    let expected = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];
    for (value, kind) in expected.iter().enumerate() {
        let text = format!("{value:04x}");
        let mut decoder = TokenDecoder::new();
        assert_eq!(decoder.push_all(text.as_bytes()).map(|t| t.kind), Some(*kind));
    }
}

#[test]
fn test_extremes() {
    assert_eq!(Token::new(0x0000).kind, PieceKind::I);
    // 65535 % 7 == 1
    assert_eq!(Token::new(0xFFFF).kind, PieceKind::O);
}

#[test]
fn test_high_bytes_are_skipped() {
    let mut decoder = TokenDecoder::new();
    assert_eq!(decoder.push_all(b"00\xC301"), Some(Token::new(0x0001)));
    assert_eq!(decoder.push(0xFF), Step::Ignored);
    assert_eq!(decoder.push_all(b"12\x80\xFE3"), None);
    assert_eq!(decoder.buffered(), "123");
    // ASCII noise still resets.
    assert_eq!(decoder.push(b'#'), Step::Desync { dropped: 3 });
}

#[test]
fn test_last_token_wins_in_the_slot() {
    let slot = PendingPieceSlot::new();
    let source = ReaderSource::new(Cursor::new(b"0002\r\n0003\r\n0004".to_vec()));
    let mut decode = DecodeLoop::new(source, slot.clone(), Duration::from_millis(1));

    let tokens: Vec<_> = (0..16).filter_map(|_| decode.poll_once()).collect();
    assert_eq!(tokens.len(), 3);
    assert_eq!(slot.load(), PieceKind::Z);
    assert_eq!(decode.stats().counts().tokens, 3);
}
