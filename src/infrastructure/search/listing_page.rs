// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::listing::{ListingBlock, ListingDetails};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use url::Url;

static BLOCK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".item_recruit").expect("valid block selector"));
static DATE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".job_date .date").expect("valid date selector"));
static DDAY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".d_day").expect("valid d-day selector"));
static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".job_tit a").expect("valid title selector"));
static COMPANY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".corp_name a").expect("valid company selector"));
static CONDITION_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".job_condition span").expect("valid condition selector"));

/// 没有截止日期元素时的默认文本（"常年招聘"）
pub const DEFAULT_DEADLINE: &str = "상시채용";
/// 经验、学历缺失时的默认值（"不限"）
pub const UNSPECIFIED: &str = "무관";

const KEYWORD_PARAM: &str = "searchword";
const PAGE_PARAM: &str = "recruitPage";

/// 招聘搜索结果页
///
/// 负责构造分页地址，并把页面解析为独立的结果块。
/// 解析是同步的，返回的结果块不借用文档。
#[derive(Debug, Clone)]
pub struct ListingPage {
    search_url: Url,
    link_base: Url,
}

impl ListingPage {
    pub fn new(search_url: &str, link_base: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            search_url: Url::parse(search_url)?,
            link_base: Url::parse(link_base)?,
        })
    }

    /// 第 `page` 页（从 1 开始）的搜索地址，关键词按表单编码
    pub fn page_url(&self, keyword: &str, page: u32) -> String {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair(KEYWORD_PARAM, keyword)
            .append_pair(PAGE_PARAM, &page.to_string());
        url.into()
    }

    /// 按文档顺序提取所有结果块
    pub fn parse(&self, html: &str) -> Vec<ListingBlock> {
        let document = Html::parse_document(html);
        document
            .select(&BLOCK_SELECTOR)
            .map(|block| ListingBlock {
                deadline_text: extract_deadline(&block),
                details: self.extract_details(&block),
            })
            .collect()
    }

    fn extract_details(&self, block: &ElementRef<'_>) -> Result<ListingDetails, String> {
        let title_link = block
            .select(&TITLE_SELECTOR)
            .next()
            .ok_or_else(|| "missing title link".to_string())?;
        let title = element_text(&title_link);
        if title.is_empty() {
            return Err("empty title".to_string());
        }

        let href = title_link
            .value()
            .attr("href")
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .ok_or_else(|| "missing detail link".to_string())?;
        let detail_url = self
            .link_base
            .join(href)
            .map_err(|e| format!("invalid detail link {}: {}", href, e))?;

        let source_name = block
            .select(&COMPANY_SELECTOR)
            .next()
            .map(|e| element_text(&e))
            .filter(|name| !name.is_empty())
            .ok_or_else(|| "missing company name".to_string())?;

        let conditions: Vec<String> = block
            .select(&CONDITION_SELECTOR)
            .map(|e| element_text(&e))
            .collect();
        let condition = |index: usize, default: &str| {
            conditions
                .get(index)
                .filter(|value| !value.is_empty())
                .cloned()
                .unwrap_or_else(|| default.to_string())
        };

        Ok(ListingDetails {
            title,
            source_name,
            location: condition(0, ""),
            required_experience: condition(1, UNSPECIFIED),
            required_education: condition(2, UNSPECIFIED),
            detail_url: detail_url.into(),
        })
    }
}

fn extract_deadline(block: &ElementRef<'_>) -> String {
    [&*DATE_SELECTOR, &*DDAY_SELECTOR]
        .into_iter()
        .find_map(|selector| {
            block
                .select(selector)
                .next()
                .map(|e| element_text(&e))
                .filter(|text| !text.is_empty())
        })
        .unwrap_or_else(|| DEFAULT_DEADLINE.to_string())
}

/// 合并元素内的文本并规整空白
fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
