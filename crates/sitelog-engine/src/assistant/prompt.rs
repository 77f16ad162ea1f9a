use crate::models::{IngestedDoc, WeeklyEntry};

const RECORD_SEPARATOR: &str = "\n---\n";

/// The three headings every generated report must contain, in order.
pub const REPORT_SECTIONS: [&str; 3] = [
    "一、本周工作回顾",
    "二、风险评估与对策",
    "三、下周工作计划",
];

fn entries_summary(entries: &[WeeklyEntry]) -> String {
    entries
        .iter()
        .map(|e| {
            format!(
                "周次: {}\n进展: {}\n风险项: {} (等级: {})\n计划: {}",
                e.week_range, e.progress, e.risks, e.risk_level, e.plan
            )
        })
        .collect::<Vec<_>>()
        .join(RECORD_SEPARATOR)
}

fn docs_summary(docs: &[IngestedDoc]) -> String {
    docs.iter()
        .map(|d| format!("参考文件: {}\n分析摘要: {}", d.name, d.content))
        .collect::<Vec<_>>()
        .join(RECORD_SEPARATOR)
}

/// Prompt asking for a formal weekly report from entries and document summaries.
///
/// Entry text is passed with its markup intact.
pub fn report_prompt(entries: &[WeeklyEntry], docs: &[IngestedDoc]) -> String {
    let [review, risks, plan] = REPORT_SECTIONS;
    format!(
        "请作为高级工程监理，根据以下每周工作记录和工程素材，整理并生成一份正式的【工程周报】。

【本周工作进展记录】
{entries}

【工程素材库支持】
{docs}

生成要求：
1. 工作回顾：请使用标准工程语言，将口语化的进展描述重构为专业的技术汇报语言。
2. 风险预警 (Critical Risks)：必须对记录中提到的风险进行分级分析，结合素材库中的延误、变更指令等信息，给出应对方案。
3. 下周施工重点：基于当前进度和遗留问题，合理推演下周的核心施工任务。

输出格式：Markdown，包含“{review}”、“{risks}”、“{plan}”。
",
        entries = entries_summary(entries),
        docs = docs_summary(docs),
    )
}

/// Prompt asking for the key engineering facts in one document.
pub fn extraction_prompt(file_name: &str, raw_text: &str) -> String {
    format!(
        "分析工程文档 ({file_name})，提取核心工程关键信息（如：设备到货、施工节点延误、变更、决策）。

内容：
{raw_text}"
    )
}
