use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fileserver-catalog")]
#[command(about = "発掘記録ファイルサーバーのカタログ・識別子抽出ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// ファイルサーバーのルート（設定ファイルより優先）
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// カタログの保存先フォルダ（設定ファイルより優先）
    #[arg(long, global = true)]
    pub storage: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ファイルサーバーを走査して全ファイルを登録
    Register {
        /// 既存エントリを残し、未登録ファイルだけ追加
        #[arg(long)]
        only_new: bool,
    },

    /// スキップ判定・存在確認を更新し、識別子を再抽出
    Update {
        /// スキップ済み・欠落済みのファイルも再確認
        #[arg(long)]
        doublecheck: bool,
    },

    /// アップロード対象ファイルの拡張子を集計
    Extensions,

    /// 指定拡張子のファイル一覧
    ByExtension {
        #[arg(required = true)]
        extension: String,

        /// スキップ・欠落ファイルも含める
        #[arg(long)]
        include_skipped: bool,
    },

    /// 識別子のないファイル一覧
    WithoutDb {
        /// スキップ・欠落ファイルも含める
        #[arg(long)]
        include_skipped: bool,
    },

    /// 識別子もパッケージもないファイル一覧
    Unassigned {
        /// スキップ・欠落ファイルも含める
        #[arg(long)]
        include_skipped: bool,
    },

    /// 未割当ファイルを含むフォルダ一覧
    UnassignedFolders {
        /// スキップ・欠落ファイルも含める
        #[arg(long)]
        include_skipped: bool,
    },

    /// 識別子に関連するファイル一覧（例: `related tomb 10010`）
    Related {
        /// AU, FieldNumber, Find, Planum, Profile, SU, ZO, Tomb のいずれか
        #[arg(required = true)]
        category: String,

        #[arg(required = true)]
        value: String,
    },

    /// フォルダ内の全ファイルをパッケージに割り当て
    AddPackage {
        /// カタログ上のフォルダ
        #[arg(required = true)]
        folder: String,

        /// パッケージ名
        #[arg(required = true)]
        name: String,

        /// サブフォルダも含める
        #[arg(short, long)]
        recursive: bool,
    },

    /// パッケージのファイル一覧
    ByPackage {
        #[arg(required = true)]
        name: String,

        /// スキップ対象も含める
        #[arg(long)]
        include_skipped: bool,
    },

    /// 全パッケージ一覧
    Packages,

    /// ファイルサーバーから消えたファイルのエントリを削除
    RemoveLost {
        /// 確認しない
        #[arg(short, long)]
        yes: bool,
    },

    /// フラグの集計を表示
    Numbers,

    /// 任意のパスから抽出した識別子を表示
    Test {
        #[arg(required = true)]
        path: String,
    },

    /// 設定の表示・変更
    Config {
        /// ファイルサーバーのルートを設定
        #[arg(long)]
        set_root: Option<PathBuf>,

        /// 保存先フォルダを設定
        #[arg(long)]
        set_storage: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
