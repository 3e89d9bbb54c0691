//! # Path Resolution Service
//!
//! `$` 区切りで入力された複数パスの分割と解決

use std::path::{Component, Path, PathBuf};

/// 複数パスの区切り文字
pub const PATH_SEPARATOR: char = '$';

/// パス解決サービス
pub struct PathResolver;

impl PathResolver {
    /// 入力を `$` で分割する
    ///
    /// 前後の空白は除去し、空の要素は捨てる
    pub fn split(input: &str) -> Vec<String> {
        input
            .split(PATH_SEPARATOR)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// 入力パスを解決する
    ///
    /// 複数パスのとき、先頭パスの親ディレクトリを共通ベースとする。
    /// すべての入力がベース直下にあるかファイル名のみであれば、
    /// ファイル名のみの入力をベースに連結する。
    /// それ以外は入力をそのまま使う。存在確認はここでは行わない。
    ///
    /// # 例
    ///
    /// ```
    /// use godrive::domain::services::path_resolver::PathResolver;
    /// use std::path::PathBuf;
    ///
    /// let inputs = PathResolver::split("/data/a.pdf$b.pdf");
    /// assert_eq!(
    ///     PathResolver::resolve(&inputs),
    ///     vec![PathBuf::from("/data/a.pdf"), PathBuf::from("/data/b.pdf")]
    /// );
    /// ```
    pub fn resolve(inputs: &[String]) -> Vec<PathBuf> {
        let paths: Vec<PathBuf> = inputs.iter().map(PathBuf::from).collect();
        if paths.len() <= 1 {
            return paths;
        }

        let base = match paths[0].parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => return paths,
        };

        let shares_base = paths
            .iter()
            .all(|p| p.parent() == Some(base.as_path()) || is_bare_name(p));
        if !shares_base {
            return paths;
        }

        paths
            .into_iter()
            .map(|p| {
                if is_bare_name(&p) {
                    base.join(p)
                } else {
                    p
                }
            })
            .collect()
    }
}

/// ディレクトリ成分を含まないファイル名かどうか
fn is_bare_name(path: &Path) -> bool {
    let mut components = path.components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
