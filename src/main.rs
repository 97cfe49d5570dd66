use job_search_scraper::banner;
use job_search_scraper::utils::logger;

fn main() {
    // 參數一律忽略，輸出與退出碼固定
    logger::init_cli_logger(false);

    if let Err(e) = banner::print_banner() {
        tracing::debug!("Banner output interrupted: {}", e);
    }
}
