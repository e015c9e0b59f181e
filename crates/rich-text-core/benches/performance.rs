use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use rich_text_core::{
    AttributedTextBuffer, RichTextAction, RichTextContext, RichTextStyle, SelectionRange,
    StyleKey, StyleValue, TextBufferAdapter,
};

fn large_text(paragraph_count: usize) -> String {
    let mut out = String::with_capacity(paragraph_count * 64);
    for i in 0..paragraph_count {
        out.push_str(&format!(
            "{i:06} the quick brown fox jumps over the lazy dog (rich-text-core benchmark)\n"
        ));
    }
    out.pop();
    out
}

/// Buffer where every other word is bold, to get a realistic number of runs.
fn fragmented_buffer(paragraph_count: usize) -> AttributedTextBuffer {
    let text = large_text(paragraph_count);
    let mut buffer = AttributedTextBuffer::new(&text);
    let mut offset = 0;
    for (i, word) in text.split(' ').enumerate() {
        let len = word.chars().count();
        if i % 2 == 0 {
            buffer.set_attribute(StyleKey::Bold, StyleValue::Flag(true), offset..offset + len);
        }
        offset += len + 1;
    }
    buffer
}

fn bench_refresh_on_selection_change(c: &mut Criterion) {
    let mut context = RichTextContext::new(fragmented_buffer(10_000));
    let len = context.buffer().len();
    c.bench_function("selection_change/10k_paragraphs", |b| {
        let mut start = 0;
        b.iter(|| {
            start = (start + 7919) % len;
            context.set_selection(SelectionRange::new(black_box(start), 5));
            black_box(context.style().version());
        })
    });
}

fn bench_toggle_bold_across_runs(c: &mut Criterion) {
    let buffer = fragmented_buffer(10_000);
    c.bench_function("toggle_bold/10k_paragraphs_full_selection", |b| {
        b.iter_batched(
            || {
                let mut context = RichTextContext::new(buffer.clone());
                let len = context.buffer().len();
                context.set_selection(SelectionRange::new(0, len));
                context
            },
            |mut context| {
                context.trigger_rich_text_action(RichTextAction::ToggleStyle(RichTextStyle::Bold));
                black_box(context.history().undo_depth());
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_indent_many_paragraphs(c: &mut Criterion) {
    let text = large_text(5_000);
    c.bench_function("increase_indent/5k_paragraphs", |b| {
        b.iter_batched(
            || {
                let mut context = RichTextContext::new(AttributedTextBuffer::new(&text));
                let len = context.buffer().len();
                context.set_selection(SelectionRange::new(0, len));
                context
            },
            |mut context| {
                context.trigger_rich_text_action(RichTextAction::IncreaseIndent);
                black_box(context.current_indent_level());
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_undo_redo_chain(c: &mut Criterion) {
    let buffer = fragmented_buffer(1_000);
    c.bench_function("undo_redo/200_font_steps", |b| {
        b.iter_batched(
            || {
                let mut context = RichTextContext::new(buffer.clone());
                context.set_selection(SelectionRange::new(100, 4_000));
                for _ in 0..200 {
                    context.trigger_rich_text_action(RichTextAction::IncrementFontSize);
                }
                context
            },
            |mut context| {
                while context.undo_latest_change() {}
                while context.redo_latest_change() {}
                black_box(context.style().font_size());
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_refresh_on_selection_change,
    bench_toggle_bold_across_runs,
    bench_indent_many_paragraphs,
    bench_undo_redo_chain
);
criterion_main!(benches);
