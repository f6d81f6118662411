use crate::history::HistoryBuffer;

/// Per-interval deltas of counter `key` across the buffer.
///
/// The output has one element per sample so it lines up with the chart
/// labels: element `i` is `sample[i+1] - sample[i]`, and the last element
/// repeats the one before it.  A single sample yields `[0.0]`.  A sample that
/// lacks `key` contributes a zero delta to both of its neighbouring intervals.
pub fn deltas(buffer: &HistoryBuffer, key: &str) -> Vec<f64> {
    let values: Vec<Option<f64>> = buffer.samples().map(|s| s.get(key)).collect();

    match values.len() {
        0 => Vec::new(),
        1 => vec![0.0],
        len => {
            let mut out: Vec<f64> = values
                .windows(2)
                .map(|pair| match (pair[0], pair[1]) {
                    (Some(prev), Some(next)) => next - prev,
                    _ => 0.0,
                })
                .collect();
            out.push(out[len - 2]);
            out
        }
    }
}
