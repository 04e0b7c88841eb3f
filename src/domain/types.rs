// ==========================================
// 状态分布驾驶舱 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 分组类型 (Breakdown Kind)
// ==========================================
// 驾驶舱固定四个面板，顺序即展示顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownKind {
    Status,               // 状态总体分布
    StatusByModule,       // 按模块排名
    StatusByOwner,        // 按负责人排名
    StatusByParentStatus, // 按上级状态堆叠
}

impl BreakdownKind {
    pub const ALL: [BreakdownKind; 4] = [
        BreakdownKind::Status,
        BreakdownKind::StatusByModule,
        BreakdownKind::StatusByOwner,
        BreakdownKind::StatusByParentStatus,
    ];

    /// 文件名 / i18n 键使用的短名
    pub fn slug(&self) -> &'static str {
        match self {
            BreakdownKind::Status => "status",
            BreakdownKind::StatusByModule => "module",
            BreakdownKind::StatusByOwner => "owner",
            BreakdownKind::StatusByParentStatus => "parent_status",
        }
    }
}

impl fmt::Display for BreakdownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

// ==========================================
// 缺失值策略 (Missing Value Policy)
// ==========================================
// Drop: 缺失值行不参与计数（默认）
// Bucket: 缺失值计入指定标签
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MissingValuePolicy {
    Drop,
    Bucket { label: String },
}

impl Default for MissingValuePolicy {
    fn default() -> Self {
        MissingValuePolicy::Drop
    }
}
