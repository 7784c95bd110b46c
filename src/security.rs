//! Security Module
//!
//! 入力読み込み時のセキュリティ制限を実装するモジュール。
//! ZIP bomb攻撃や巨大ファイルによるメモリ枯渇への対策を提供します。

use std::io::Read;

use crate::error::{Result, ViewerError};

/// セキュリティ設定
///
/// ファイル読み込み時の制限を定義します。ディレクトリ入力とZIP入力の両方に適用されます。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityConfig {
    /// 読み込み後の合計最大サイズ（バイト）
    /// デフォルト: 1GB (1_073_741_824 bytes)
    pub max_decompressed_size: u64,
    /// 読み込む最大ファイル数
    /// デフォルト: 10000
    pub max_file_count: usize,
    /// 単一ファイルの最大サイズ（バイト）
    /// デフォルト: 100MB (104_857_600 bytes)
    pub max_file_size: u64,
    /// 入力ZIPファイルの最大サイズ（バイト）
    /// デフォルト: 2GB (2_147_483_648 bytes)
    pub max_input_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_decompressed_size: 1_073_741_824, // 1GB
            max_file_count: 10_000,
            max_file_size: 104_857_600,         // 100MB
            max_input_file_size: 2_147_483_648, // 2GB
        }
    }
}

impl SecurityConfig {
    /// デフォルトのセキュリティ設定を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 設定値の整合性を検証
    ///
    /// すべての上限は0より大きく、単一ファイルの上限は合計の上限以下でなければなりません。
    pub fn validate(&self) -> Result<()> {
        if self.max_file_count == 0 {
            return Err(ViewerError::Config(
                "max_file_count must be greater than 0".to_string(),
            ));
        }
        if self.max_file_size == 0 || self.max_decompressed_size == 0 || self.max_input_file_size == 0
        {
            return Err(ViewerError::Config(
                "size limits must be greater than 0".to_string(),
            ));
        }
        if self.max_file_size > self.max_decompressed_size {
            return Err(ViewerError::Config(format!(
                "max_file_size ({}) exceeds max_decompressed_size ({})",
                self.max_file_size, self.max_decompressed_size
            )));
        }
        Ok(())
    }

    /// 入力ZIPファイル自体のサイズを検証
    pub(crate) fn check_input_size(&self, size: u64) -> Result<()> {
        if size > self.max_input_file_size {
            return Err(ViewerError::SecurityViolation(format!(
                "Input file size exceeds maximum: {} bytes (max: {} bytes)",
                size, self.max_input_file_size
            )));
        }
        Ok(())
    }
}

/// 読み込み中のファイル数と合計サイズを追跡する
pub(crate) struct LoadBudget<'a> {
    config: &'a SecurityConfig,
    file_count: usize,
    total_size: u64,
}

impl<'a> LoadBudget<'a> {
    pub fn new(config: &'a SecurityConfig) -> Self {
        Self {
            config,
            file_count: 0,
            total_size: 0,
        }
    }

    /// 申告サイズ（ZIPの中央ディレクトリやメタデータ由来）で事前チェックする
    pub fn admit(&mut self, name: &str, declared_size: u64) -> Result<()> {
        self.file_count += 1;
        if self.file_count > self.config.max_file_count {
            return Err(ViewerError::SecurityViolation(format!(
                "too many files: more than {}",
                self.config.max_file_count
            )));
        }
        self.check_file_size(name, declared_size)
    }

    /// 実際に読み込んだサイズを加算する
    pub fn consume(&mut self, name: &str, actual_size: u64) -> Result<()> {
        self.check_file_size(name, actual_size)?;
        self.total_size += actual_size;
        if self.total_size > self.config.max_decompressed_size {
            return Err(ViewerError::SecurityViolation(format!(
                "total size exceeds maximum: {} bytes (max: {} bytes)",
                self.total_size, self.config.max_decompressed_size
            )));
        }
        Ok(())
    }

    /// 単一ファイルの上限を1バイト超えるところまでだけ読み込む
    ///
    /// 申告サイズが偽装されていても、上限を超えた時点で読み込みを止められます。
    pub fn read_limited<R: Read>(&self, reader: R) -> std::io::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        reader
            .take(self.config.max_file_size.saturating_add(1))
            .read_to_end(&mut buffer)?;
        Ok(buffer)
    }

    fn check_file_size(&self, name: &str, size: u64) -> Result<()> {
        if size > self.config.max_file_size {
            return Err(ViewerError::SecurityViolation(format!(
                "file '{}' exceeds maximum size: {} bytes (max: {} bytes)",
                name, size, self.config.max_file_size
            )));
        }
        Ok(())
    }
}
