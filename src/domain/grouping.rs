/// Splits an ordered row stream into runs of consecutive rows sharing a key.
///
/// A new group starts whenever the key differs from the previous row's key.
/// Runs are never merged: rows must already be clustered by key (e.g. by an
/// `ORDER BY` on the key), otherwise one logical group comes back split.
pub fn group_contiguous_by<T, K, I, F>(rows: I, mut key: F) -> Vec<Vec<T>>
where
    I: IntoIterator<Item = T>,
    K: PartialEq,
    F: FnMut(&T) -> K,
{
    let (mut groups, current) = rows.into_iter().fold(
        (Vec::new(), None::<(K, Vec<T>)>),
        |(mut groups, current), row| {
            let row_key = key(&row);
            let current = match current {
                Some((current_key, mut rows)) if current_key == row_key => {
                    rows.push(row);
                    (current_key, rows)
                }
                Some((_, sealed)) => {
                    groups.push(sealed);
                    (row_key, vec![row])
                }
                None => (row_key, vec![row]),
            };
            (groups, Some(current))
        },
    );
    if let Some((_, last)) = current {
        groups.push(last);
    }
    groups
}
