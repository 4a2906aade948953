use divan::counter::BytesCount;
use divan::{Bencher, black_box_drop};
use protocol::message::Message;
use protocol::tag::Tag;

fn main() {
    divan::main();
}

fn sample_request_bytes() -> Vec<u8> {
    let msg = Message::build(vec![(Tag::NONC, vec![0x42; 64])], true).unwrap();
    msg.encode()
}

#[divan::bench(min_time = 0.25)]
fn parse_request(bencher: Bencher) {
    let raw = sample_request_bytes();

    bencher
        .counter(BytesCount::new(raw.len()))
        .with_inputs(|| raw.clone())
        .bench_local_refs(|data| black_box_drop(Message::parse(data).unwrap()));
}

#[divan::bench(min_time = 0.25)]
fn build_request(bencher: Bencher) {
    bencher.bench_local(|| {
        black_box_drop(Message::build(vec![(Tag::NONC, vec![0x42; 64])], true).unwrap())
    });
}
